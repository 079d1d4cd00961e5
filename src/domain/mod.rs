//! Domain logic - pure versioning rules independent of git and file I/O

pub mod bump;
pub mod commit;
pub mod tag;
pub mod version;

pub use bump::{resolve_bump, BumpLevel};
pub use commit::{ClassifiedCommit, CommitType, SectionKey};
pub use tag::TagFormat;
pub use version::{increase_version, Version};
