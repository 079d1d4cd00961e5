use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::bump::BumpLevel;

/// Closed set of recognized conventional commit types.
///
/// Commits whose type is outside this set never enter the pipeline; the
/// parser drops them before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Build,
    Ci,
    Docs,
    Feat,
    Fix,
    Perf,
    Refactor,
    Style,
    Test,
    Chore,
    Revert,
    Bump,
    Init,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Docs => "docs",
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Perf => "perf",
            CommitType::Refactor => "refactor",
            CommitType::Style => "style",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
            CommitType::Bump => "bump",
            CommitType::Init => "init",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(CommitType::Build),
            "ci" => Ok(CommitType::Ci),
            "docs" => Ok(CommitType::Docs),
            "feat" => Ok(CommitType::Feat),
            "fix" => Ok(CommitType::Fix),
            "perf" => Ok(CommitType::Perf),
            "refactor" => Ok(CommitType::Refactor),
            "style" => Ok(CommitType::Style),
            "test" => Ok(CommitType::Test),
            "chore" => Ok(CommitType::Chore),
            "revert" => Ok(CommitType::Revert),
            "bump" => Ok(CommitType::Bump),
            "init" => Ok(CommitType::Init),
            other => Err(format!("Unknown commit type: '{}'", other)),
        }
    }
}

/// Key into the bump map and the changelog section map.
///
/// `breaking` is a pseudo-type: it never appears as a commit header type but
/// keys the bump level and changelog section for breaking-change footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Breaking,
    Type(CommitType),
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKey::Breaking => f.write_str("breaking"),
            SectionKey::Type(t) => t.fmt(f),
        }
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "breaking" {
            return Ok(SectionKey::Breaking);
        }
        s.parse::<CommitType>().map(SectionKey::Type)
    }
}

impl Serialize for SectionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SectionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parsed representation of one conventional commit.
///
/// Immutable once constructed; `bump` is derived from the other fields at
/// parse time and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub commit_type: CommitType,
    /// Explicit `!` marker before the colon
    pub is_major: bool,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    /// Text of the first `BREAKING CHANGE:` footer line, if any
    pub breaking: Option<String>,
    /// Version impact of this commit, if any
    pub bump: Option<BumpLevel>,
    /// Original message, retained for diagnostics
    pub raw_message: String,
}
