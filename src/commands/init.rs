//! `setupmenu init`: write a profile holding only the default selection.

use std::path::Path;

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::commands::fresh_session;

pub fn run(profile: &Path, force: bool) -> Result<()> {
    let selected = write_defaults(profile, force)?;
    println!("  {} {}", "Created".green().bold(), profile.display());
    println!(
        "  {} items selected by default. Run {} to change them.",
        selected.to_string().green(),
        "setupmenu view".cyan()
    );
    Ok(())
}

/// Returns how many items the new profile selects.
fn write_defaults(profile: &Path, force: bool) -> Result<usize> {
    if profile.exists() && !force {
        bail!(
            "{} already exists. Pass --force to overwrite it with the defaults.",
            profile.display()
        );
    }
    let mut controller = fresh_session(profile)?;
    controller.save()?;
    Ok(controller.store().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_default_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf/profile.yml");
        let selected = write_defaults(&path, false).unwrap();
        assert!(selected > 0);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("- python"));
        assert!(content.contains("- firefox"));
        assert!(!content.contains("- docker"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.yml");
        fs::write(&path, "selected_items: [docker]\n").unwrap();
        assert!(write_defaults(&path, false).is_err());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "selected_items: [docker]\n"
        );
    }

    #[test]
    fn force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.yml");
        fs::write(&path, "selected_items: [docker]\n").unwrap();
        write_defaults(&path, true).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("docker"));
        assert!(content.contains("- git"));
    }
}
