pub mod changelog;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod orchestration;
pub mod ui;
pub mod versioning;

pub use error::{Result, SemverBumpError};
