use regex::Regex;

use crate::error::{Result, SemverBumpError};

/// Tag naming template with a `$version` placeholder (e.g. `"v$version"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFormat {
    format: String,
}

impl TagFormat {
    /// Create a new tag format
    pub fn new(format: impl Into<String>) -> Self {
        TagFormat {
            format: format.into(),
        }
    }

    /// Format a tag for a concrete version.
    /// Example: format="v$version", version="1.2.3" -> "v1.2.3"
    pub fn apply(&self, version: &str) -> String {
        self.format.replacen("$version", version, 1)
    }

    /// Glob pattern matching any tag produced by this format, suitable for
    /// `git tag --list` style matching.
    pub fn glob(&self) -> String {
        self.format.replacen("$version", "[0-9]*.[0-9]*.[0-9]*", 1)
    }

    /// Extract the version part from a tag produced by this format.
    pub fn extract_version(&self, tag: &str) -> Result<Option<String>> {
        let escaped = regex::escape(&self.format);
        let pattern = escaped.replacen(r"\$version", r"(\d+\.\d+\.\d+)", 1);
        let re = Regex::new(&format!("^{}$", pattern))
            .map_err(|e| SemverBumpError::tag(format!("Invalid tag format: {}", e)))?;

        Ok(re
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()))
    }
}
