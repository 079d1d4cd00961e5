use std::collections::HashMap;

use crate::error::Result;
use crate::git::Repository;

/// Mock repository for testing without actual git operations.
///
/// Commit lists are scripted per tag; like the real collaborator, they are
/// stored newest first.
pub struct MockRepository {
    /// Full history up to HEAD, newest first
    history: Vec<String>,
    /// Commits strictly after each known tag, newest first
    commits_after_tag: HashMap<String, Vec<String>>,
    /// Tag returned for pattern lookups
    latest_tag: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            history: Vec::new(),
            commits_after_tag: HashMap::new(),
            latest_tag: None,
        }
    }

    /// Set the full commit history (newest first)
    pub fn set_history(&mut self, messages: Vec<String>) {
        self.history = messages;
    }

    /// Add a tag with the commits that came after it (newest first)
    pub fn add_tag(&mut self, name: impl Into<String>, commits_after: Vec<String>) {
        let name = name.into();
        self.commits_after_tag.insert(name.clone(), commits_after);
        self.latest_tag = Some(name);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tag_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.commits_after_tag.contains_key(tag))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<String>> {
        match tag {
            Some(name) => Ok(self
                .commits_after_tag
                .get(name)
                .cloned()
                .unwrap_or_default()),
            None => Ok(self.history.clone()),
        }
    }

    fn most_recent_tag_matching(&self, _pattern: &str) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("1.0.0", vec!["fix: a bug".to_string()]);

        assert!(repo.tag_exists("1.0.0").unwrap());
        assert!(!repo.tag_exists("2.0.0").unwrap());
    }

    #[test]
    fn test_mock_repository_commits_since_tag() {
        let mut repo = MockRepository::new();
        repo.add_tag(
            "1.0.0",
            vec!["fix: newer".to_string(), "fix: older".to_string()],
        );

        let commits = repo.commits_since(Some("1.0.0")).unwrap();
        assert_eq!(commits, vec!["fix: newer", "fix: older"]);
    }

    #[test]
    fn test_mock_repository_full_history() {
        let mut repo = MockRepository::new();
        repo.set_history(vec!["feat: second".to_string(), "init: first".to_string()]);

        let commits = repo.commits_since(None).unwrap();
        assert_eq!(commits.len(), 2);
    }

    #[test]
    fn test_mock_repository_latest_tag() {
        let mut repo = MockRepository::new();
        assert_eq!(repo.most_recent_tag_matching("*").unwrap(), None);

        repo.add_tag("0.1.0", vec![]);
        repo.add_tag("0.2.0", vec![]);
        assert_eq!(
            repo.most_recent_tag_matching("*").unwrap(),
            Some("0.2.0".to_string())
        );
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.commits_since(None).unwrap().is_empty());
    }
}
