// SPDX-License-Identifier: MPL-2.0
//! Integration tests for settings persistence and what the presentation
//! components take from it.

use lab_scheduler::app::config::{self, Config};
use lab_scheduler::i18n::fluent::I18n;
use lab_scheduler::notifications::{Manager, Position};
use lab_scheduler::overlays::Registry;
use lab_scheduler::surface::MemorySurface;
use lab_scheduler::ui::theming::ThemeMode;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut settings = Config::default();
    settings.general.language = Some("en-US".to_string());
    config::save_to_path(&settings, &path).expect("Failed to write initial config file");
    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("action-refresh"), "Refresh");

    settings.general.language = Some("fr".to_string());
    config::save_to_path(&settings, &path).expect("Failed to write french config file");
    let loaded = config::load_from_path(&path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("action-refresh"), "Actualiser");
}

#[test]
fn cli_language_beats_config() {
    let mut settings = Config::default();
    settings.general.language = Some("fr".to_string());
    let i18n = I18n::new(Some("en-US".to_string()), None, &settings);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn notification_section_configures_the_queue() {
    let dir = tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join("settings.toml"),
        "[notifications]\nmax_visible = 2\nduration_ms = 1500\nposition = \"bottom-left\"\n",
    )
    .expect("write settings");

    let (settings, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let mut manager = Manager::with_clock(
        MemorySurface::new(),
        lab_scheduler::clock::ManualClock::new(),
        settings.notifications.queue_settings(),
    )
    .expect("manager");
    assert_eq!(manager.settings().position, Position::BottomLeft);

    let first = manager.info("one", None).expect("show");
    assert_eq!(manager.remaining(first), Some(Duration::from_millis(1500)));
    manager.info("two", None).expect("show");
    manager.info("three", None).expect("show");
    assert_eq!(manager.count(), 2);
    assert!(!manager.exists(first));
}

#[test]
fn overlays_section_can_drop_the_backdrop() {
    let dir = tempdir().expect("temp dir");
    let mut settings = Config::default();
    settings.overlays.backdrop = false;
    settings.overlays.z_index_base = 50;
    config::save_with_override(&settings, Some(dir.path().to_path_buf())).expect("save");

    let (loaded, _) = config::load_with_override(Some(dir.path().to_path_buf()));
    let registry = Registry::with_settings(MemorySurface::new(), loaded.overlays.registry_settings())
        .expect("registry");
    assert!(registry.backdrop().is_none());
    assert_eq!(registry.settings().z_index_base, 50);
}

#[test]
fn corrupt_file_falls_back_with_a_warning_key() {
    let dir = tempdir().expect("temp dir");
    std::fs::write(dir.path().join("settings.toml"), "[general\ntheme_mode = ").expect("write");

    let (settings, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(settings, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));

    let i18n = I18n::new(Some("en-US".to_string()), None, &settings);
    assert!(!i18n.tr("notification-config-load-error").starts_with("MISSING"));
}

#[test]
fn theme_mode_survives_a_round_trip() {
    let dir = tempdir().expect("temp dir");
    let mut settings = Config::default();
    settings.general.theme_mode = ThemeMode::Dark;
    config::save_with_override(&settings, Some(dir.path().to_path_buf())).expect("save");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
}
