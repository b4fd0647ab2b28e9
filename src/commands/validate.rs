//! `setupmenu validate`: check the built-in catalog for structural problems.

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::menu::catalog::{self, Issue};
use crate::menu::seed::{self, SeedEntry};

pub fn run() -> Result<()> {
    let issues = check(seed::ENTRIES);
    let fatal = issues.iter().filter(|issue| issue.is_fatal()).count();

    for issue in &issues {
        if issue.is_fatal() {
            println!("  {} {}", "error".red().bold(), issue);
        } else {
            println!("  {} {}", "warning".yellow().bold(), issue);
        }
    }
    if fatal > 0 {
        bail!("catalog has {fatal} structural error(s)");
    }

    let categories = seed::ENTRIES.iter().filter(|e| e.is_category()).count();
    println!(
        "  {} {} categories, {} items",
        "OK".green().bold(),
        categories,
        seed::ENTRIES.len() - categories
    );
    Ok(())
}

/// Seed-level problems first. The catalog is only built and checked when the
/// seed itself is clean, since a duplicate id would abort the build anyway.
fn check(entries: &[SeedEntry]) -> Vec<Issue> {
    let issues = catalog::validate_seed(entries);
    if !issues.is_empty() {
        return issues;
    }
    match catalog::build(entries) {
        Ok(built) => catalog::validate(&built),
        Err(err) => vec![Issue::Build {
            reason: err.to_string(),
        }],
    }
}
