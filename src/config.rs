use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{BumpLevel, CommitType, SectionKey};
use crate::error::{Result, SemverBumpError};

/// Complete configuration for semver-bump.
///
/// Every field has a default mirroring the tool's stock behavior, so an empty
/// config file (or none at all) is fully usable.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Tag naming template with a `$version` placeholder
    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    /// Versioning system selector: "manual" or "apple-generic"
    #[serde(default = "default_versioning_system")]
    pub versioning_system: String,

    /// Backing file for the version store; defaults per backend
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,

    /// Bump commit message template with `$current_version` and
    /// `$new_version` placeholders
    #[serde(default = "default_bump_message")]
    pub bump_message: String,

    /// Optional release name embedded in the changelog title
    #[serde(default)]
    pub release_name: Option<String>,

    #[serde(default)]
    pub commits: CommitsConfig,

    /// Ordered changelog sections; order is preserved in the rendered output
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

/// Configuration for conventional commit classification.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CommitsConfig {
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<CommitType>,

    #[serde(default = "default_bump_map")]
    pub bump_map: HashMap<SectionKey, BumpLevel>,

    /// Forced minimum bump level
    #[serde(default)]
    pub force_type: Option<BumpLevel>,
}

/// One changelog section: a commit type (or `breaking`) and its title.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SectionConfig {
    pub r#type: SectionKey,
    pub title: String,
}

fn default_tag_format() -> String {
    "$version".to_string()
}

fn default_versioning_system() -> String {
    "manual".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_bump_message() -> String {
    "version $current_version → $new_version".to_string()
}

fn default_allowed_types() -> Vec<CommitType> {
    vec![
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
    ]
}

fn default_bump_map() -> HashMap<SectionKey, BumpLevel> {
    HashMap::from([
        (SectionKey::Breaking, BumpLevel::Major),
        (SectionKey::Type(CommitType::Feat), BumpLevel::Minor),
        (SectionKey::Type(CommitType::Fix), BumpLevel::Patch),
    ])
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig {
            r#type: SectionKey::Breaking,
            title: "BREAKING CHANGES".to_string(),
        },
        SectionConfig {
            r#type: SectionKey::Type(CommitType::Feat),
            title: "Features".to_string(),
        },
        SectionConfig {
            r#type: SectionKey::Type(CommitType::Fix),
            title: "Bug Fixes".to_string(),
        },
    ]
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            allowed_types: default_allowed_types(),
            bump_map: default_bump_map(),
            force_type: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_format: default_tag_format(),
            versioning_system: default_versioning_system(),
            target: None,
            changelog_file: default_changelog_file(),
            bump_message: default_bump_message(),
            release_name: None,
            commits: CommitsConfig::default(),
            sections: default_sections(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `semverbump.toml` in current directory
/// 3. `.semverbump.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./semverbump.toml").exists() {
        fs::read_to_string("./semverbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".semverbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| SemverBumpError::config(format!("Cannot parse config: {}", e)))?;
    Ok(config)
}
