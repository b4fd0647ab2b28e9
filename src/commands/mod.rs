pub mod import;
pub mod init;
pub mod list;
pub mod tree;
pub mod validate;
pub mod view;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::controller::{ApplyMode, LoadReport, MenuController};
use crate::menu::catalog;
use crate::profile::PersistenceError;

/// Open a session on the built-in catalog with the profile at `path` applied.
///
/// `Ok(None)` when there is no profile yet. Any other read failure is an
/// error: a damaged profile is never silently replaced by defaults.
pub fn load_session(path: &Path) -> Result<Option<(MenuController, LoadReport)>> {
    let catalog = catalog::builtin().context("built-in catalog is broken")?;
    let mut controller = MenuController::new(catalog, path.to_path_buf());
    match controller.load(path, ApplyMode::Replace) {
        Ok(report) => {
            if !report.skipped.is_empty() || !report.rejected.is_empty() {
                warn!(
                    skipped = report.skipped.len(),
                    rejected = report.rejected.len(),
                    "profile entries ignored"
                );
            }
            Ok(Some((controller, report)))
        }
        Err(PersistenceError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err).context("could not load profile"),
    }
}

/// A first-run session: defaults only, nothing read from disk.
pub fn fresh_session(path: &Path) -> Result<MenuController> {
    let catalog = catalog::builtin().context("built-in catalog is broken")?;
    Ok(MenuController::with_defaults(catalog, path.to_path_buf()))
}

/// One-line summary of entries a profile carried that were not applied.
pub fn ignored_summary(report: &LoadReport) -> Option<String> {
    let ignored = report.skipped.len() + report.rejected.len();
    (ignored > 0).then(|| {
        let mut ids: Vec<&str> = report.skipped.iter().map(String::as_str).collect();
        ids.extend(report.rejected.iter().map(|(id, _)| id.as_str()));
        let noun = if ignored == 1 { "entry" } else { "entries" };
        format!("ignored {ignored} profile {noun}: {}", ids.join(", "))
    })
}
