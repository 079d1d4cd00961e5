use std::path::Path;

use git2::{Oid, Repository as Git2Repo};

use crate::error::{Result, SemverBumpError};
use crate::git::{CommitSink, Repository};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let oid = reference
                    .peel(git2::ObjectType::Commit)
                    .map_err(|e| SemverBumpError::tag(format!("Cannot peel tag: {}", e)))?
                    .id();

                Ok(Some(oid))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(SemverBumpError::tag(format!(
                "Cannot find tag '{}': {}",
                tag_name, e
            ))),
        }
    }
}

impl Repository for Git2Repository {
    fn tag_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.tag_oid(tag)?.is_some())
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(tag_name) = tag {
            let oid = self.tag_oid(tag_name)?.ok_or_else(|| {
                SemverBumpError::tag(format!("Tag '{}' does not exist", tag_name))
            })?;
            revwalk.hide(oid)?;
        }

        let mut messages = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            messages.push(commit.message().unwrap_or("(empty message)").to_string());
        }

        Ok(messages)
    }

    fn most_recent_tag_matching(&self, pattern: &str) -> Result<Option<String>> {
        let names = self.repo.tag_names(Some(pattern))?;

        let mut best: Option<(String, i64)> = None;
        for name in names.iter().flatten() {
            let Some(oid) = self.tag_oid(name)? else {
                continue;
            };
            let time = self.repo.find_commit(oid)?.time().seconds();

            match &best {
                Some((_, best_time)) if *best_time >= time => {}
                _ => best = Some((name.to_string(), time)),
            }
        }

        Ok(best.map(|(name, _)| name))
    }
}

impl CommitSink for Git2Repository {
    fn commit_change(&self, message: &str, files: &[&Path]) -> Result<()> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| SemverBumpError::config("Repository has no working directory"))?
            .to_path_buf();

        let mut index = self.repo.index()?;
        for file in files {
            let relative = file.strip_prefix(&workdir).unwrap_or(file);
            index.add_path(relative)?;
        }
        index.write()?;

        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;
        let signature = self.repo.signature()?;

        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&head],
        )?;

        Ok(())
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send.
// All trait methods take &self and only perform reads or index/commit writes
// guarded by libgit2's internal locking.
unsafe impl Sync for Git2Repository {}
