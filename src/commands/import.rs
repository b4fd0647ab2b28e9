//! `setupmenu import FILE`: add another profile's selection to the saved one.
//!
//! Items already selected stay selected. Values set in FILE replace the
//! current ones; everything else keeps its value.

use std::path::Path;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use tracing::info;

use crate::commands::{fresh_session, ignored_summary, load_session};
use crate::controller::{ApplyMode, LoadReport, MenuController};

pub fn run(profile: &Path, source: &Path) -> Result<()> {
    let (controller, report) = merge_into(profile, source)?;
    println!(
        "  {} {} into {}",
        "Imported".green().bold(),
        source.display(),
        profile.display()
    );
    if let Some(summary) = ignored_summary(&report) {
        println!("  {} {}", "Warning".yellow().bold(), summary);
    }
    println!(
        "  {} items from the import, {} selected in total.",
        report.applied.to_string().green(),
        controller.store().len()
    );
    Ok(())
}

/// Merge `source` into the profile at `profile` and save the result.
///
/// With no saved profile the merge starts from the defaults. Nothing is
/// written when `source` cannot be read.
fn merge_into(profile: &Path, source: &Path) -> Result<(MenuController, LoadReport)> {
    let mut controller = match load_session(profile)? {
        Some((controller, _)) => controller,
        None => fresh_session(profile)?,
    };
    let report = controller
        .load(source, ApplyMode::Merge)
        .with_context(|| format!("could not import {}", source.display()))?;
    controller.save()?;
    info!(
        source = %source.display(),
        applied = report.applied,
        "profile imported"
    );
    Ok((controller, report))
}
