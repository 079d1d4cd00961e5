//! Terminal output formatting.
//!
//! Pure display helpers; no prompts. All user-facing text goes through here
//! so the CLI shell stays free of styling concerns.

use console::style;

use crate::orchestration::VersioningFacts;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the evaluated versioning facts as a small summary block.
pub fn display_facts(facts: &VersioningFacts) {
    let bump = facts
        .bump
        .map(|b| b.to_string())
        .unwrap_or_else(|| "none".to_string());

    println!("{}", style("Versioning info:").bold());
    println!("  Current version: {}", facts.current_version);
    println!("  Current tag:     {}", facts.current_tag);
    println!("  Bump type:       {}", bump);
    println!("  Next version:    {}", facts.next_version);
    println!(
        "  Bumpable:        {}",
        if facts.bumpable {
            style("yes").green()
        } else {
            style("no").yellow()
        }
    );
    println!();
    println!("{}", facts.changelog);
}
