use std::path::Path;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};

use semver_bump::config::{self, Config};
use semver_bump::domain::BumpLevel;
use semver_bump::git::Git2Repository;
use semver_bump::orchestration::{bump_commit_message, Orchestrator, VersioningPolicy};
use semver_bump::ui;
use semver_bump::versioning::{self, VersioningSystem};

#[derive(Parser)]
#[command(
    name = "semver-bump",
    about = "Compute and apply semantic version bumps from conventional commits"
)]
struct Cli {
    #[arg(short, long, help = "Custom configuration file path", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the next version and changelog without changing anything
    Info {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Apply the bump: write the version, update the changelog, commit
    Bump {
        #[command(flatten)]
        opts: CommonOpts,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
}

/// Flags shared by both subcommands; each overrides its config counterpart.
#[derive(ClapArgs)]
struct CommonOpts {
    #[arg(long, help = "Force a minimum bump level (major, minor or patch)")]
    force_type: Option<String>,

    #[arg(long, help = "Tag naming template with a $version placeholder")]
    tag_format: Option<String>,

    #[arg(long, help = "Versioning system: manual or apple-generic")]
    versioning_system: Option<String>,

    #[arg(long, help = "Backing file of the version store")]
    target: Option<String>,

    #[arg(long, help = "Changelog file to prepend to")]
    changelog_file: Option<String>,

    #[arg(long, help = "Bump commit message template")]
    bump_message: Option<String>,

    #[arg(long, help = "Release name embedded in the changelog title")]
    release_name: Option<String>,

    #[arg(
        long,
        help = "Compute relative to the last released tag instead of the staged version"
    )]
    update: bool,
}

impl CommonOpts {
    /// Fold the CLI overrides into the loaded configuration.
    fn merge_into(&self, config: &mut Config) -> Result<()> {
        if let Some(level) = &self.force_type {
            let parsed: BumpLevel = level
                .parse()
                .map_err(|e: String| anyhow::anyhow!("Configuration error: {}", e))?;
            config.commits.force_type = Some(parsed);
        }
        if let Some(format) = &self.tag_format {
            config.tag_format = format.clone();
        }
        if let Some(system) = &self.versioning_system {
            config.versioning_system = system.clone();
        }
        if let Some(target) = &self.target {
            config.target = Some(target.clone());
        }
        if let Some(file) = &self.changelog_file {
            config.changelog_file = file.clone();
        }
        if let Some(message) = &self.bump_message {
            config.bump_message = message.clone();
        }
        if let Some(name) = &self.release_name {
            config.release_name = Some(name.clone());
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (opts, dry_run) = match &cli.command {
        Command::Info { opts } => (opts, false),
        Command::Bump { opts, dry_run } => (opts, *dry_run),
    };

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    opts.merge_into(&mut config)?;

    let system: VersioningSystem = config.versioning_system.parse()?;
    let store = versioning::open_store(system, config.target.as_deref());
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let policy = VersioningPolicy::from_config(&config, opts.update)?;
    let orchestrator = Orchestrator::new(policy, store.as_ref(), &repo);
    let facts = orchestrator.evaluate()?;

    match &cli.command {
        Command::Info { .. } => {
            ui::display_facts(&facts);
        }
        Command::Bump { .. } => {
            if !facts.bumpable {
                ui::display_status("No version bump detected.");
                return Ok(());
            }

            if dry_run {
                ui::display_status("Dry run:");
                ui::display_success(&format!(
                    "  Would set version {} → {} in {}",
                    facts.current_version,
                    facts.next_version,
                    store.path().display()
                ));
                ui::display_success(&format!(
                    "  Would prepend changelog section to {}",
                    config.changelog_file
                ));
                ui::display_success(&format!(
                    "  Would commit with message: {}",
                    bump_commit_message(&config.bump_message, &facts)
                ));
                return Ok(());
            }

            orchestrator.apply(
                &facts,
                &repo,
                Some(Path::new(&config.changelog_file)),
                &config.bump_message,
            )?;
            ui::display_success(&format!(
                "Bumped version {} → {}",
                facts.current_version, facts.next_version
            ));
        }
    }

    Ok(())
}
