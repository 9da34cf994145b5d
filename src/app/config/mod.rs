// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[notifications]` - Toast cap, lifetime, position and hidden-page pausing
//! - `[overlays]` - Modal stacking base and backdrop
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `LAB_SCHEDULER_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lab_scheduler::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::notifications::{Position, QueueSettings};
use crate::overlays::RegistrySettings;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Toast queue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// How many toasts may be live at once.
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,

    /// Lifetime of a toast when the caller gives none. Zero persists.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Window corner or edge the toast stack is anchored to.
    #[serde(default)]
    pub position: Position,

    /// Pause toast timers while the window is not focused.
    #[serde(default = "default_true")]
    pub pause_when_hidden: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            duration_ms: DEFAULT_DURATION_MS,
            position: Position::default(),
            pause_when_hidden: true,
        }
    }
}

impl NotificationsConfig {
    /// Queue settings with out-of-range values clamped.
    #[must_use]
    pub fn queue_settings(&self) -> QueueSettings {
        QueueSettings {
            max_visible: self.max_visible.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE),
            default_duration: Duration::from_millis(self.duration_ms.min(MAX_DURATION_MS)),
            position: self.position,
            pause_when_hidden: self.pause_when_hidden,
        }
    }
}

/// Modal overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlaysConfig {
    #[serde(default = "default_z_index_base")]
    pub z_index_base: i32,

    /// Dim the page behind the active overlay.
    #[serde(default = "default_true")]
    pub backdrop: bool,
}

impl Default for OverlaysConfig {
    fn default() -> Self {
        Self {
            z_index_base: DEFAULT_Z_INDEX_BASE,
            backdrop: true,
        }
    }
}

impl OverlaysConfig {
    #[must_use]
    pub fn registry_settings(&self) -> RegistrySettings {
        RegistrySettings {
            z_index_base: self.z_index_base,
            backdrop: self.backdrop,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub overlays: OverlaysConfig,
}

fn default_max_visible() -> usize {
    DEFAULT_MAX_VISIBLE
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_z_index_base() -> i32 {
    DEFAULT_Z_INDEX_BASE
}

fn default_true() -> bool {
    true
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {other}"))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to show the user.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    warn!(path = ?path, error = %err, "falling back to default settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
