use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SemverBumpError};
use crate::versioning::VersionStore;

/// Version store backed by a plain text file holding only the version string.
pub struct PlainVersionStore {
    path: PathBuf,
}

impl PlainVersionStore {
    pub fn new(path: PathBuf) -> Self {
        PlainVersionStore { path }
    }
}

impl VersionStore for PlainVersionStore {
    fn read(&self) -> Result<String> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            SemverBumpError::source(format!("Cannot read '{}': {}", self.path.display(), e))
        })?;

        let version = content.trim();
        if version.is_empty() {
            return Err(SemverBumpError::source(format!(
                "Version file '{}' is empty",
                self.path.display()
            )));
        }

        Ok(version.to_string())
    }

    fn write(&self, version: &str) -> Result<()> {
        fs::write(&self.path, format!("{}\n", version))?;
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION");
        fs::write(&path, "1.2.3\n").unwrap();

        let store = PlainVersionStore::new(path);
        assert_eq!(store.read().unwrap(), "1.2.3");
    }

    #[test]
    fn test_read_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION");
        fs::write(&path, "\n").unwrap();

        let store = PlainVersionStore::new(path);
        assert!(store.read().is_err());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlainVersionStore::new(dir.path().join("VERSION"));

        store.write("2.0.0").unwrap();
        assert_eq!(store.read().unwrap(), "2.0.0");
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "2.0.0\n"
        );
    }
}
