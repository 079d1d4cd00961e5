//! Changelog building and writing.
//!
//! Groups classified commits into titled sections and renders one Markdown
//! block per release, matching the section order the caller configured.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::domain::{ClassifiedCommit, SectionKey};
use crate::error::Result;

/// Ordered mapping from section keys to their changelog titles.
pub type SectionTitles = Vec<(SectionKey, String)>;

/// One rendered changelog bucket: a title (absent for the overflow bucket)
/// and the entry lines collected for it, in input order.
struct Bucket<'a> {
    title: Option<&'a str>,
    entries: Vec<&'a str>,
}

/// Group commits into buckets following the configured section order, with a
/// trailing untitled bucket for major-bump commits of unsectioned types.
///
/// A commit with a breaking note lands in the `breaking` section (when one is
/// configured) and additionally in its own type's section; the two entries
/// use the note text and the subject respectively, without de-duplication.
fn group_commits<'a>(
    commits: &'a [ClassifiedCommit],
    sections: &'a SectionTitles,
) -> Vec<Bucket<'a>> {
    let mut buckets: Vec<Bucket<'a>> = sections
        .iter()
        .map(|(_, title)| Bucket {
            title: Some(title.as_str()),
            entries: Vec::new(),
        })
        .collect();
    buckets.push(Bucket {
        title: None,
        entries: Vec::new(),
    });

    let breaking_idx = sections
        .iter()
        .position(|(key, _)| *key == SectionKey::Breaking);
    let overflow_idx = buckets.len() - 1;

    for commit in commits {
        if let (Some(note), Some(idx)) = (commit.breaking.as_deref(), breaking_idx) {
            buckets[idx].entries.push(note);
        }

        let type_idx = sections
            .iter()
            .position(|(key, _)| *key == SectionKey::Type(commit.commit_type));

        match type_idx {
            Some(idx) => buckets[idx].entries.push(&commit.subject),
            None if commit.is_major => buckets[overflow_idx].entries.push(&commit.subject),
            None => {}
        }
    }

    buckets
}

/// Render the changelog section for an upcoming release.
///
/// The title line embeds the next version, an optional release name and the
/// local calendar date. Empty buckets are skipped entirely; the overflow
/// bucket renders last with no title line.
pub fn build_changelog(
    version: &str,
    commits: &[ClassifiedCommit],
    sections: &SectionTitles,
    release_name: Option<&str>,
) -> String {
    let today = Local::now().format("%Y-%m-%d");
    let title = match release_name {
        Some(name) => format!("## {} {} ({})", version, name, today),
        None => format!("## {} ({})", version, today),
    };

    let mut lines = vec![title, String::new()];

    for bucket in group_commits(commits, sections) {
        if bucket.entries.is_empty() {
            continue;
        }

        if let Some(title) = bucket.title {
            lines.push(format!("### {}:", title));
        }
        lines.push(String::new());

        for entry in bucket.entries {
            lines.push(format!("- {}", entry));
        }
        lines.push(String::new());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Prepend a new changelog section to the file at `path`.
///
/// Prior content is preserved below the new section, separated by one blank
/// line. The file is created when it does not exist.
pub fn write_changelog(path: &Path, changelog: &str) -> Result<()> {
    let previous = if path.exists() {
        Some(fs::read_to_string(path)?)
    } else {
        None
    };

    let mut content = String::from(changelog);
    if let Some(previous) = previous {
        content.push('\n');
        content.push_str(&previous);
    }

    fs::write(path, content)?;
    Ok(())
}
