use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::commit::ClassifiedCommit;

/// Version impact of a change: `Patch < Minor < Major`.
///
/// The absent level ("none") is `Option<BumpLevel>::None` throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpLevel::Patch => f.write_str("patch"),
            BumpLevel::Minor => f.write_str("minor"),
            BumpLevel::Major => f.write_str("major"),
        }
    }
}

impl FromStr for BumpLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patch" => Ok(BumpLevel::Patch),
            "minor" => Ok(BumpLevel::Minor),
            "major" => Ok(BumpLevel::Major),
            other => Err(format!("Unknown bump level: '{}'", other)),
        }
    }
}

/// Reduce a sequence of classified commits plus an optional forced floor to a
/// single bump decision.
///
/// Any commit with an explicit major marker, or a major bump level derived
/// from its breaking-change footer, short-circuits to `Major`. Minor raises
/// the running result; patch only fills an unset one. A `Major` floor wins
/// outright.
pub fn resolve_bump(
    commits: &[ClassifiedCommit],
    force: Option<BumpLevel>,
) -> Option<BumpLevel> {
    if force == Some(BumpLevel::Major) {
        return force;
    }

    let mut result = force;

    for commit in commits {
        if commit.is_major {
            return Some(BumpLevel::Major);
        }

        match commit.bump {
            Some(BumpLevel::Major) => return Some(BumpLevel::Major),
            Some(BumpLevel::Minor) => result = Some(BumpLevel::Minor),
            Some(BumpLevel::Patch) if result.is_none() => result = Some(BumpLevel::Patch),
            _ => {}
        }
    }

    result
}
