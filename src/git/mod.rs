//! Git operations abstraction layer
//!
//! The orchestrator consumes commit history through the [Repository] trait
//! rather than a concrete git client, so tests can substitute an in-memory
//! implementation and each invocation can be handed a fresh handle. Concrete
//! implementations:
//!
//! - [repository::Git2Repository]: real repositories via the `git2` crate
//! - [mock::MockRepository]: scripted history for tests

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::error::Result;

/// Read-only view of a repository's tags and commit history.
///
/// `commits_since` delivers raw commit messages newest first, as the
/// underlying version-control system produces them; callers that need
/// chronological order reverse the list themselves.
pub trait Repository: Send + Sync {
    /// Whether a tag with the exact given name exists.
    fn tag_exists(&self, tag: &str) -> Result<bool>;

    /// Raw commit messages strictly after `tag`, newest first.
    ///
    /// With `None`, the full history up to HEAD is returned.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<String>>;

    /// The most recently created tag matching a glob pattern, if any.
    fn most_recent_tag_matching(&self, pattern: &str) -> Result<Option<String>>;
}

/// Side-effecting collaborator that records a version bump as a commit.
///
/// Kept separate from [Repository] so the evaluation path stays read-only.
pub trait CommitSink {
    /// Stage the given files and commit them to HEAD with `message`.
    fn commit_change(&self, message: &str, files: &[&Path]) -> Result<()>;
}
