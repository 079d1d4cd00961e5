use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Result, SemverBumpError};
use crate::versioning::VersionStore;

/// Version store backed by a TOML project manifest.
///
/// Reads `package.version` (or a top-level `version` key). Writing rewrites
/// only the version line so the rest of the manifest keeps its formatting.
pub struct ManifestVersionStore {
    path: PathBuf,
}

impl ManifestVersionStore {
    pub fn new(path: PathBuf) -> Self {
        ManifestVersionStore { path }
    }
}

impl VersionStore for ManifestVersionStore {
    fn read(&self) -> Result<String> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            SemverBumpError::source(format!("Cannot read '{}': {}", self.path.display(), e))
        })?;
        let value: toml::Value = toml::from_str(&content).map_err(|e| {
            SemverBumpError::source(format!("Cannot parse '{}': {}", self.path.display(), e))
        })?;

        let version = value
            .get("package")
            .and_then(|p| p.get("version"))
            .or_else(|| value.get("version"))
            .and_then(|v| v.as_str());

        version.map(|v| v.to_string()).ok_or_else(|| {
            SemverBumpError::source(format!(
                "No version field found in '{}'",
                self.path.display()
            ))
        })
    }

    fn write(&self, version: &str) -> Result<()> {
        // Read first so a missing or unversioned manifest fails before the
        // file is touched.
        self.read()?;

        let content = fs::read_to_string(&self.path)?;
        let re = Regex::new(r#"(?m)^(version\s*=\s*")[^"]*(")"#)
            .map_err(|e| SemverBumpError::source(format!("Invalid version pattern: {}", e)))?;
        let updated = re.replacen(&content, 1, format!("${{1}}{}${{2}}", version));

        fs::write(&self.path, updated.as_ref())?;
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"[package]
name = "demo"
version = "0.1.0"
edition = "2021"

[dependencies]
serde = { version = "1.0" }
"#;

    fn store_with(content: &str) -> (tempfile::TempDir, ManifestVersionStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(&path, content).unwrap();
        (dir, ManifestVersionStore::new(path))
    }

    #[test]
    fn test_read_package_version() {
        let (_dir, store) = store_with(MANIFEST);
        assert_eq!(store.read().unwrap(), "0.1.0");
    }

    #[test]
    fn test_read_top_level_version() {
        let (_dir, store) = store_with("version = \"2.3.4\"\n");
        assert_eq!(store.read().unwrap(), "2.3.4");
    }

    #[test]
    fn test_read_missing_version_field() {
        let (_dir, store) = store_with("[package]\nname = \"demo\"\n");
        assert!(store.read().is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestVersionStore::new(dir.path().join("Cargo.toml"));
        assert!(store.read().is_err());
    }

    #[test]
    fn test_write_updates_only_version_line() {
        let (_dir, store) = store_with(MANIFEST);
        store.write("0.2.0").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("version = \"0.2.0\""));
        // Dependency version specs are untouched.
        assert!(content.contains("serde = { version = \"1.0\" }"));
        assert_eq!(store.read().unwrap(), "0.2.0");
    }
}
