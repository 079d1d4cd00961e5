//! Conventional commit parsing.
//!
//! Turns raw commit messages into [ClassifiedCommit] records. Parsing is a
//! filter, not a validation step: messages that do not match the grammar are
//! skipped silently.

use std::collections::HashMap;

use regex::Regex;

use crate::domain::{BumpLevel, ClassifiedCommit, CommitType, SectionKey};
use crate::error::{Result, SemverBumpError};

/// Parser for the `type(scope)?!?: subject` grammar.
///
/// The header regex is compiled once from the allowed-types alternation.
/// A body, when present, is separated from the subject by exactly one blank
/// line; a single newline after the subject does not match the grammar at all.
pub struct CommitParser {
    header: Regex,
    breaking_footer: Regex,
    bump_map: HashMap<SectionKey, BumpLevel>,
}

impl CommitParser {
    /// Build a parser for the given allowed types and type-to-level map.
    pub fn new(
        allowed_types: &[CommitType],
        bump_map: HashMap<SectionKey, BumpLevel>,
    ) -> Result<Self> {
        if allowed_types.is_empty() {
            return Err(SemverBumpError::config(
                "At least one allowed commit type is required",
            ));
        }

        let alternation = allowed_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(
            r"^(?P<type>{})(\((?P<scope>\S+)\))?(?P<major>!)?:\s+(?P<subject>[^\r\n]+)(?:\n\n(?P<body>(?s:.*)))?$",
            alternation
        );
        let header = Regex::new(&pattern)
            .map_err(|e| SemverBumpError::config(format!("Invalid commit grammar: {}", e)))?;

        let breaking_footer = Regex::new(r"(?m)^BREAKING CHANGES?: (.+)$")
            .map_err(|e| SemverBumpError::config(format!("Invalid footer pattern: {}", e)))?;

        Ok(CommitParser {
            header,
            breaking_footer,
            bump_map,
        })
    }

    /// Parse one raw commit message.
    ///
    /// Returns `None` when the header does not match the grammar or the type
    /// is not in the allowed set. An unknown type is dropped even when it
    /// carries the `!` marker; a forced minimum bump level is the supported
    /// way to push such a release through.
    pub fn parse(&self, raw_message: &str) -> Option<ClassifiedCommit> {
        let message = raw_message.trim_end_matches(['\n', '\r']);
        let captures = self.header.captures(message)?;

        // The alternation only admits allowed types, so this parse cannot fail.
        let commit_type: CommitType = captures.name("type")?.as_str().parse().ok()?;
        let is_major = captures.name("major").is_some();
        let scope = captures.name("scope").map(|m| m.as_str().to_string());
        let subject = captures.name("subject")?.as_str().to_string();
        let body = captures.name("body").map(|m| m.as_str().to_string());

        // First matching footer line wins; later occurrences are not re-scanned.
        let breaking = body.as_deref().and_then(|b| {
            self.breaking_footer
                .captures(b)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        });

        let bump = if is_major {
            Some(BumpLevel::Major)
        } else if breaking.is_some() {
            self.bump_map.get(&SectionKey::Breaking).copied()
        } else {
            self.bump_map
                .get(&SectionKey::Type(commit_type))
                .copied()
        };

        Some(ClassifiedCommit {
            commit_type,
            is_major,
            scope,
            subject,
            body,
            breaking,
            bump,
            raw_message: raw_message.to_string(),
        })
    }

    /// Parse a batch of raw messages, dropping non-conforming ones.
    pub fn parse_all(&self, raw_messages: &[String]) -> Vec<ClassifiedCommit> {
        raw_messages
            .iter()
            .filter_map(|m| self.parse(m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_bump_map() -> HashMap<SectionKey, BumpLevel> {
        HashMap::from([
            (SectionKey::Breaking, BumpLevel::Major),
            (SectionKey::Type(CommitType::Feat), BumpLevel::Minor),
            (SectionKey::Type(CommitType::Fix), BumpLevel::Patch),
        ])
    }

    fn parser() -> CommitParser {
        let allowed = [
            CommitType::Build,
            CommitType::Ci,
            CommitType::Docs,
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Perf,
            CommitType::Refactor,
            CommitType::Style,
            CommitType::Test,
            CommitType::Chore,
            CommitType::Revert,
            CommitType::Bump,
            CommitType::Init,
        ];
        CommitParser::new(&allowed, default_bump_map()).unwrap()
    }

    #[test]
    fn test_parse_simple_message() {
        let commit = parser().parse("feat: add new feature").unwrap();
        assert_eq!(commit.commit_type, CommitType::Feat);
        assert_eq!(commit.scope, None);
        assert_eq!(commit.subject, "add new feature");
        assert_eq!(commit.body, None);
        assert_eq!(commit.breaking, None);
        assert!(!commit.is_major);
        assert_eq!(commit.bump, Some(BumpLevel::Minor));
    }

    #[test]
    fn test_parse_with_scope() {
        let commit = parser().parse("feat(my-scope): add new feature").unwrap();
        assert_eq!(commit.scope, Some("my-scope".to_string()));
        assert_eq!(commit.subject, "add new feature");
    }

    #[test]
    fn test_parse_scope_and_major_marker() {
        let commit = parser().parse("feat(scope)!: add X").unwrap();
        assert_eq!(commit.commit_type, CommitType::Feat);
        assert_eq!(commit.scope, Some("scope".to_string()));
        assert_eq!(commit.subject, "add X");
        assert!(commit.is_major);
        assert_eq!(commit.breaking, None);
        assert_eq!(commit.bump, Some(BumpLevel::Major));
    }

    #[test]
    fn test_parse_with_body() {
        let commit = parser()
            .parse("feat(my-scope): add new feature\n\nThis is the body\nCloses: #42")
            .unwrap();
        assert_eq!(
            commit.body,
            Some("This is the body\nCloses: #42".to_string())
        );
        assert_eq!(commit.breaking, None);
    }

    #[test]
    fn test_parse_body_with_breaking_footer() {
        let commit = parser()
            .parse("feat: X\n\nBREAKING CHANGE: Y")
            .unwrap();
        assert_eq!(commit.breaking, Some("Y".to_string()));
        assert_eq!(commit.bump, Some(BumpLevel::Major));
        assert!(!commit.is_major);
    }

    #[test]
    fn test_parse_breaking_footer_after_body_text() {
        let commit = parser()
            .parse(
                "feat(my-scope): add new feature\n\nThis is the body\nCloses: #42\n\nBREAKING CHANGE: It barfs everything",
            )
            .unwrap();
        assert_eq!(
            commit.body,
            Some("This is the body\nCloses: #42\n\nBREAKING CHANGE: It barfs everything".to_string())
        );
        assert_eq!(commit.breaking, Some("It barfs everything".to_string()));
    }

    #[test]
    fn test_parse_breaking_footer_plural_form() {
        let commit = parser().parse("fix: X\n\nBREAKING CHANGES: plural").unwrap();
        assert_eq!(commit.breaking, Some("plural".to_string()));
    }

    #[test]
    fn test_parse_first_breaking_footer_wins() {
        let commit = parser()
            .parse("fix: X\n\nBREAKING CHANGE: first\nBREAKING CHANGE: second")
            .unwrap();
        assert_eq!(commit.breaking, Some("first".to_string()));
    }

    #[test]
    fn test_parse_footer_text_stays_in_body() {
        let commit = parser()
            .parse("feat(my-scope): add new feature\n\nThis is the body\nCloses: #42\n\nThe footer")
            .unwrap();
        assert_eq!(
            commit.body,
            Some("This is the body\nCloses: #42\n\nThe footer".to_string())
        );
        assert_eq!(commit.breaking, None);
    }

    #[test]
    fn test_parse_unsectioned_type_with_major_marker() {
        let commit = parser().parse("bump!: first official release").unwrap();
        assert_eq!(commit.commit_type, CommitType::Bump);
        assert!(commit.is_major);
        assert_eq!(commit.scope, None);
        assert_eq!(commit.subject, "first official release");
        assert_eq!(commit.bump, Some(BumpLevel::Major));
    }

    #[test]
    fn test_parse_rejects_invalid_header() {
        assert!(parser().parse("This is an invalid commit message").is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        assert!(parser().parse("oops: bad").is_none());
        assert!(parser().parse("oops!: still dropped").is_none());
    }

    #[test]
    fn test_parse_rejects_single_newline_body() {
        assert!(parser()
            .parse("feat: new feature\ninvalid second line")
            .is_none());
    }

    #[test]
    fn test_parse_rejects_type_outside_allowed_subset() {
        let allowed = [CommitType::Feat, CommitType::Fix];
        let restricted = CommitParser::new(&allowed, default_bump_map()).unwrap();
        assert!(restricted.parse("chore: tidy").is_none());
        assert!(restricted.parse("feat: kept").is_some());
    }

    #[test]
    fn test_parse_type_without_mapped_level_has_no_bump() {
        let commit = parser().parse("docs: update readme").unwrap();
        assert_eq!(commit.bump, None);
    }

    #[test]
    fn test_parse_tolerates_trailing_newline() {
        let commit = parser().parse("fix: something\n").unwrap();
        assert_eq!(commit.subject, "something");
        assert_eq!(commit.raw_message, "fix: something\n");
    }

    #[test]
    fn test_parser_requires_allowed_types() {
        assert!(CommitParser::new(&[], default_bump_map()).is_err());
    }

    #[test]
    fn test_parse_all_filters() {
        let messages = vec![
            "feat: one".to_string(),
            "not conventional".to_string(),
            "fix: two".to_string(),
        ];
        let commits = parser().parse_all(&messages);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].subject, "one");
        assert_eq!(commits[1].subject, "two");
    }
}
