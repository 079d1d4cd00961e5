use thiserror::Error;

/// Unified error type for semver-bump operations
#[derive(Error, Debug)]
pub enum SemverBumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Version source error: {0}")]
    VersionSource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-bump
pub type Result<T> = std::result::Result<T, SemverBumpError>;

impl SemverBumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverBumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SemverBumpError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        SemverBumpError::Tag(msg.into())
    }

    /// Create a version-source error with context
    pub fn source(msg: impl Into<String>) -> Self {
        SemverBumpError::VersionSource(msg.into())
    }
}
