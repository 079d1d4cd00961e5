//! Version storage backends.
//!
//! The current version lives outside this tool, in one of two places selected
//! by the `versioning_system` setting: a TOML project manifest (`manual`) or a
//! plain version file maintained by the build system (`apple-generic`). Both
//! are reached through the [VersionStore] trait.

pub mod manifest;
pub mod plain;

pub use manifest::ManifestVersionStore;
pub use plain::PlainVersionStore;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, SemverBumpError};

/// Recognized versioning system selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersioningSystem {
    /// Version lives in a TOML project manifest addressed by `target`
    Manual,
    /// Version lives in a plain version file written by the build system
    AppleGeneric,
}

impl FromStr for VersioningSystem {
    type Err = SemverBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" => Ok(VersioningSystem::Manual),
            "apple-generic" => Ok(VersioningSystem::AppleGeneric),
            other => Err(SemverBumpError::config(format!(
                "'versioning_system' must be one of [\"manual\", \"apple-generic\"], got '{}'",
                other
            ))),
        }
    }
}

/// Read/write access to the project's current version.
pub trait VersionStore {
    /// Current dotted version string.
    fn read(&self) -> Result<String>;

    /// Persist a new version to the backend.
    fn write(&self, version: &str) -> Result<()>;

    /// Backing file, for inclusion in the bump commit.
    fn path(&self) -> &Path;
}

/// Build the store for a selector, defaulting the target path per backend.
pub fn open_store(system: VersioningSystem, target: Option<&str>) -> Box<dyn VersionStore> {
    match system {
        VersioningSystem::Manual => Box::new(ManifestVersionStore::new(PathBuf::from(
            target.unwrap_or("Cargo.toml"),
        ))),
        VersioningSystem::AppleGeneric => Box::new(PlainVersionStore::new(PathBuf::from(
            target.unwrap_or("VERSION"),
        ))),
    }
}
