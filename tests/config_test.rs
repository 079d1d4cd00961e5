// tests/config_test.rs
use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use semver_bump::config::{load_config, Config};
use semver_bump::domain::{BumpLevel, CommitType, SectionKey};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.tag_format, "$version");
    assert_eq!(config.versioning_system, "manual");
    assert_eq!(config.changelog_file, "CHANGELOG.md");
    assert_eq!(config.bump_message, "version $current_version → $new_version");
    assert!(config.commits.allowed_types.contains(&CommitType::Feat));
    assert!(config.commits.allowed_types.contains(&CommitType::Bump));
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
tag_format = "v$version"
versioning_system = "apple-generic"
target = "VERSION"

[commits]
allowed_types = ["feat", "fix", "chore"]
force_type = "minor"

[commits.bump_map]
breaking = "major"
feat = "minor"

[[sections]]
type = "feat"
title = "New Features"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tag_format, "v$version");
    assert_eq!(config.versioning_system, "apple-generic");
    assert_eq!(config.target, Some("VERSION".to_string()));
    assert_eq!(
        config.commits.allowed_types,
        vec![CommitType::Feat, CommitType::Fix, CommitType::Chore]
    );
    assert_eq!(config.commits.force_type, Some(BumpLevel::Minor));
    assert_eq!(
        config.commits.bump_map.get(&SectionKey::Type(CommitType::Feat)),
        Some(&BumpLevel::Minor)
    );
    assert_eq!(config.sections.len(), 1);
    assert_eq!(config.sections[0].title, "New Features");
}

#[test]
fn test_load_malformed_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"tag_format = [not toml").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_load_missing_explicit_file_fails() {
    assert!(load_config(Some("/nonexistent/semverbump.toml")).is_err());
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("semverbump.toml"),
        "tag_format = \"rel-$version\"\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(original).unwrap();

    assert_eq!(config.unwrap().tag_format, "rel-$version");
}

#[test]
#[serial]
fn test_load_defaults_when_no_file_present() {
    let dir = tempfile::tempdir().unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(original).unwrap();

    let config = config.unwrap();
    assert_eq!(config.tag_format, "$version");
    assert_eq!(config.sections.len(), 3);
}
