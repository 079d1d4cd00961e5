//! Versioning info orchestration.
//!
//! Ties the parser, resolver, arithmetic and renderer together: figures out
//! the commit range since the last release tag, classifies it, and exposes
//! the resulting facts to the CLI shell. The shell decides whether to act on
//! them (the `apply` path).

use std::collections::HashMap;
use std::path::Path;

use crate::changelog::{build_changelog, write_changelog, SectionTitles};
use crate::config::Config;
use crate::conventional::CommitParser;
use crate::domain::{increase_version, resolve_bump, BumpLevel, CommitType, SectionKey, TagFormat};
use crate::error::{Result, SemverBumpError};
use crate::git::{CommitSink, Repository};
use crate::versioning::VersionStore;

/// Everything `evaluate` needs to know, resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct VersioningPolicy {
    pub tag_format: TagFormat,
    pub allowed_types: Vec<CommitType>,
    pub bump_map: HashMap<SectionKey, BumpLevel>,
    pub sections: SectionTitles,
    pub force_type: Option<BumpLevel>,
    pub release_name: Option<String>,
    /// Compute relative to the last released tag instead of the staged version
    pub update: bool,
}

impl VersioningPolicy {
    /// Build a policy from loaded configuration, validating its shape.
    pub fn from_config(config: &Config, update: bool) -> Result<Self> {
        if config.commits.allowed_types.is_empty() {
            return Err(SemverBumpError::config(
                "At least one allowed commit type is required",
            ));
        }

        Ok(VersioningPolicy {
            tag_format: TagFormat::new(config.tag_format.clone()),
            allowed_types: config.commits.allowed_types.clone(),
            bump_map: config.commits.bump_map.clone(),
            sections: config
                .sections
                .iter()
                .map(|s| (s.r#type, s.title.clone()))
                .collect(),
            force_type: config.commits.force_type,
            release_name: config.release_name.clone(),
            update,
        })
    }
}

/// Output bundle of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersioningFacts {
    pub current_version: String,
    pub current_tag: String,
    pub bump: Option<BumpLevel>,
    pub next_version: String,
    pub changelog: String,
    /// Whether applying the bump would actually change the version
    pub bumpable: bool,
}

/// Drives one evaluation against explicitly passed-in collaborators.
///
/// The orchestrator borrows its collaborators instead of caching them in
/// process-wide state, so repeated evaluations (and tests) can hand in a
/// fresh repository handle each time.
pub struct Orchestrator<'a> {
    policy: VersioningPolicy,
    store: &'a dyn VersionStore,
    repo: &'a dyn Repository,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        policy: VersioningPolicy,
        store: &'a dyn VersionStore,
        repo: &'a dyn Repository,
    ) -> Self {
        Orchestrator {
            policy,
            store,
            repo,
        }
    }

    /// Compute the versioning facts for the current repository state.
    pub fn evaluate(&self) -> Result<VersioningFacts> {
        let current_version = if self.policy.update {
            self.previous_version()?
        } else {
            self.store.read()?
        };

        let current_tag = self.policy.tag_format.apply(&current_version);

        let from = if self.repo.tag_exists(&current_tag)? {
            Some(current_tag.as_str())
        } else {
            None
        };
        let mut raw_messages = self.repo.commits_since(from)?;
        // The collaborator delivers newest first; parsing and rendering read
        // oldest first.
        raw_messages.reverse();

        let parser = CommitParser::new(&self.policy.allowed_types, self.policy.bump_map.clone())?;
        let commits = parser.parse_all(&raw_messages);

        let bump = resolve_bump(&commits, self.policy.force_type);
        let next_version = increase_version(&current_version, bump)?;
        let changelog = build_changelog(
            &next_version,
            &commits,
            &self.policy.sections,
            self.policy.release_name.as_deref(),
        );
        let bumpable = next_version != current_version;

        Ok(VersioningFacts {
            current_version,
            current_tag,
            bump,
            next_version,
            changelog,
            bumpable,
        })
    }

    /// Apply previously evaluated facts: write the version, prepend the
    /// changelog and commit the touched files.
    ///
    /// Returns `Ok(false)` without side effects when the facts carry no bump;
    /// callers report that as an informational outcome, not an error.
    pub fn apply(
        &self,
        facts: &VersioningFacts,
        sink: &dyn CommitSink,
        changelog_file: Option<&Path>,
        bump_message: &str,
    ) -> Result<bool> {
        if !facts.bumpable {
            return Ok(false);
        }

        self.store.write(&facts.next_version)?;

        let mut files: Vec<&Path> = vec![self.store.path()];
        if let Some(path) = changelog_file {
            write_changelog(path, &facts.changelog)?;
            files.push(path);
        }

        let message = bump_commit_message(bump_message, facts);
        sink.commit_change(&message, &files)?;

        Ok(true)
    }

    /// Version of the last release, read from the most recent matching tag.
    ///
    /// Defaults to `0.0.0` when no tag matches the format.
    fn previous_version(&self) -> Result<String> {
        let pattern = self.policy.tag_format.glob();
        match self.repo.most_recent_tag_matching(&pattern)? {
            Some(tag) => self
                .policy
                .tag_format
                .extract_version(&tag)?
                .ok_or_else(|| {
                    SemverBumpError::tag(format!(
                        "Tag '{}' does not carry an extractable version",
                        tag
                    ))
                }),
            None => Ok("0.0.0".to_string()),
        }
    }
}

/// Expand the bump message template into the final commit message.
pub fn bump_commit_message(template: &str, facts: &VersioningFacts) -> String {
    format!(
        "bump: {}",
        template
            .replacen("$current_version", &facts.current_version, 1)
            .replacen("$new_version", &facts.next_version, 1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_commit_message() {
        let facts = VersioningFacts {
            current_version: "0.1.0".to_string(),
            current_tag: "0.1.0".to_string(),
            bump: Some(BumpLevel::Patch),
            next_version: "0.1.1".to_string(),
            changelog: String::new(),
            bumpable: true,
        };
        assert_eq!(
            bump_commit_message("version $current_version → $new_version", &facts),
            "bump: version 0.1.0 → 0.1.1"
        );
    }

    #[test]
    fn test_policy_rejects_empty_allowed_types() {
        let mut config = Config::default();
        config.commits.allowed_types.clear();
        assert!(VersioningPolicy::from_config(&config, false).is_err());
    }

    #[test]
    fn test_policy_from_default_config() {
        let policy = VersioningPolicy::from_config(&Config::default(), false).unwrap();
        assert_eq!(policy.tag_format, TagFormat::new("$version"));
        assert_eq!(policy.sections.len(), 3);
        assert!(!policy.update);
    }
}
