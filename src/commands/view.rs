use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::commands::{fresh_session, ignored_summary, load_session};
use crate::controller::MenuController;
use crate::tui::app;

pub fn run(profile: &Path, fresh: bool) -> Result<()> {
    let (controller, message) = open(profile, fresh)?;
    info!(profile = %profile.display(), fresh, "starting menu");
    app::run(controller, message)
}

/// The session the menu starts with, plus a line to greet the user with.
fn open(profile: &Path, fresh: bool) -> Result<(MenuController, Option<String>)> {
    if fresh {
        let controller = fresh_session(profile)?;
        return Ok((controller, Some("starting from defaults".to_string())));
    }
    match load_session(profile)? {
        Some((controller, report)) => {
            let message = ignored_summary(&report)
                .unwrap_or_else(|| format!("loaded {}", profile.display()));
            Ok((controller, Some(message)))
        }
        None => {
            let controller = fresh_session(profile)?;
            Ok((controller, Some("no saved profile; defaults selected".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_run_starts_from_defaults() {
        let dir = TempDir::new().unwrap();
        let (controller, message) = open(&dir.path().join("p.yml"), false).unwrap();
        assert!(controller.store().contains("python"));
        assert!(!controller.is_dirty());
        assert!(message.unwrap().contains("defaults"));
    }

    #[test]
    fn fresh_ignores_saved_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.yml");
        fs::write(&path, "selected_items: [docker]\n").unwrap();

        let (loaded, _) = open(&path, false).unwrap();
        assert!(loaded.store().contains("docker"));
        assert!(!loaded.store().contains("python"));

        let (fresh, _) = open(&path, true).unwrap();
        assert!(!fresh.store().contains("docker"));
        assert!(fresh.store().contains("python"));
    }

    #[test]
    fn ignored_entries_are_reported_on_start() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.yml");
        fs::write(&path, "selected_items: [docker, gone]\n").unwrap();
        let (_, message) = open(&path, false).unwrap();
        assert_eq!(message.unwrap(), "ignored 1 profile entry: gone");
    }
}
