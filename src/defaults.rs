//! Default locations for repo-backup configuration.
//!
//! This module provides centralized path defaults used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Filename looked for in the current directory first.
pub const LOCAL_CONFIG_FILE: &str = ".repo-backup.yaml";

/// Returns the configuration file to use when none was given explicitly.
///
/// Resolution order:
/// 1. `.repo-backup.yaml` in the current directory, if it exists.
/// 2. The platform-appropriate config directory:
///    - Linux: `~/.config/repo-backup/config.yaml` (XDG Base Directory)
///    - macOS: `~/Library/Application Support/repo-backup/config.yaml`
///    - Windows: `{FOLDERID_RoamingAppData}\repo-backup\config.yaml`
///
/// Falls back to the local filename if the platform config directory cannot
/// be determined. This can be overridden by the `--config` CLI flag or the
/// `REPO_BACKUP_CONFIG` environment variable.
pub fn default_config_file() -> PathBuf {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return local;
    }

    dirs::config_dir()
        .map(|dir| dir.join("repo-backup").join("config.yaml"))
        .unwrap_or(local)
}
