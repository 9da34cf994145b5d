// SPDX-License-Identifier: MPL-2.0
//! Application directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI argument** `--config-dir` - set via [`init_cli_overrides`]
//! 3. **Environment variable** `LAB_SCHEDULER_CONFIG_DIR`
//! 4. **Platform default** - via the `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
pub const APP_NAME: &str = "LabScheduler";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LAB_SCHEDULER_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` CLI argument.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_cli_overrides(config_dir: Option<String>) {
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .expect("CLI config dir override already initialized");
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

/// Returns the directory holding `settings.toml`.
///
/// - Linux: `~/.config/LabScheduler/`
/// - macOS: `~/Library/Application Support/LabScheduler/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\LabScheduler\`
#[must_use]
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory, honoring `override_path` first.
#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = get_cli_config_dir() {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
