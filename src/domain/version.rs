use std::fmt;

use crate::domain::bump::BumpLevel;
use crate::error::{Result, SemverBumpError};

/// Semantic version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted numeric version string.
    ///
    /// Shorter inputs are padded with zero components from the left and only
    /// the rightmost three components are kept, so `"1.0"` reads as `0.1.0`
    /// and `"5"` as `0.0.5`. Non-numeric components are an error.
    pub fn parse(input: &str) -> Result<Self> {
        let mut components: Vec<u64> = vec![0, 0];

        for part in input.split('.') {
            let value = part.trim().parse::<u64>().map_err(|_| {
                SemverBumpError::version(format!(
                    "Invalid version component '{}' in '{}'",
                    part, input
                ))
            })?;
            components.push(value);
        }

        let len = components.len();
        Ok(Version {
            major: components[len - 3],
            minor: components[len - 2],
            patch: components[len - 1],
        })
    }

    /// Apply a bump decision, returning a fresh triple.
    ///
    /// `None` is the no-op case: the version is returned unchanged.
    pub fn bump(&self, level: Option<BumpLevel>) -> Self {
        match level {
            Some(BumpLevel::Major) => Version::new(self.major + 1, 0, 0),
            Some(BumpLevel::Minor) => Version::new(self.major, self.minor + 1, 0),
            Some(BumpLevel::Patch) => Version::new(self.major, self.minor, self.patch + 1),
            None => *self,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Bump a dotted version string, normalizing to exactly three components.
pub fn increase_version(current: &str, level: Option<BumpLevel>) -> Result<String> {
    Ok(Version::parse(current)?.bump(level).to_string())
}
