//! Where the profile and log files live.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use directories_next::ProjectDirs;

/// Overrides the default profile location.
pub const PROFILE_ENV: &str = "SETUPMENU_PROFILE";

pub const PROFILE_FILE_NAME: &str = "profile.yml";
pub const LOG_FILE_NAME: &str = "setupmenu.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "setupmenu")
}

/// Resolve the profile path: `--profile` flag, then `SETUPMENU_PROFILE`, then
/// the per-user config directory.
pub fn profile_path(flag: Option<&Path>) -> Result<PathBuf> {
    let default = project_dirs().map(|dirs| dirs.config_dir().join(PROFILE_FILE_NAME));
    resolve_profile_path(flag, std::env::var(PROFILE_ENV).ok(), default)
}

pub fn resolve_profile_path(
    flag: Option<&Path>,
    env: Option<String>,
    default: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    match default {
        Some(path) => Ok(path),
        None => bail!(
            "could not determine a config directory; pass --profile or set {}",
            PROFILE_ENV
        ),
    }
}

/// Log file used while the interactive menu owns the terminal.
pub fn log_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}
