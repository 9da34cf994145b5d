// SPDX-License-Identifier: MPL-2.0
//! Light, dark and system theme handling.

use crate::notifications::Severity;
use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Colors used by the dashboard, dialogs and toasts.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub surface_primary: Color,
    pub surface_secondary: Color,

    pub text_primary: Color,
    pub text_secondary: Color,

    pub brand_primary: Color,
    pub brand_secondary: Color,

    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,

    /// Dimming layer drawn under the active dialog.
    pub backdrop: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::WHITE,
            surface_secondary: palette::GRAY_100,

            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,

            brand_primary: palette::PRIMARY_500,
            brand_secondary: palette::PRIMARY_600,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,

            backdrop: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            },
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::GRAY_900,
            surface_secondary: Color::from_rgb(0.15, 0.15, 0.15),

            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,

            brand_primary: palette::PRIMARY_400,
            brand_secondary: palette::PRIMARY_500,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,

            backdrop: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
        }
    }

    /// Accent color of a toast or status badge.
    #[must_use]
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Loading => self.brand_primary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppTheme {
    pub colors: ColorScheme,
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// System mode asks the desktop and falls back to dark.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }

    /// Light, then dark, then system.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            ThemeMode::Light => "theme-light",
            ThemeMode::Dark => "theme-dark",
            ThemeMode::System => "theme-system",
        }
    }
}

impl AppTheme {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        let colors = if mode.is_dark() {
            ColorScheme::dark()
        } else {
            ColorScheme::light()
        };
        Self { colors, mode }
    }

    #[must_use]
    pub fn iced_theme(&self) -> Theme {
        if self.mode.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_has_light_surface() {
        assert!(ColorScheme::light().surface_primary.r > 0.9);
    }

    #[test]
    fn dark_theme_has_dark_surface() {
        assert!(ColorScheme::dark().surface_primary.r < 0.2);
    }

    #[test]
    fn severities_get_distinct_accents() {
        let scheme = ColorScheme::light();
        assert_eq!(scheme.severity(Severity::Error), palette::ERROR_500);
        assert_ne!(
            scheme.severity(Severity::Success),
            scheme.severity(Severity::Warning)
        );
    }

    #[test]
    fn backdrop_is_translucent() {
        for scheme in [ColorScheme::light(), ColorScheme::dark()] {
            assert!(scheme.backdrop.a > 0.0 && scheme.backdrop.a < 1.0);
        }
    }

    #[test]
    fn theme_modes_cycle_back_to_light() {
        let mode = ThemeMode::Light.next().next().next();
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.next(), ThemeMode::System);
    }

    #[test]
    fn explicit_modes_map_to_iced_themes() {
        assert_eq!(AppTheme::new(ThemeMode::Light).iced_theme(), Theme::Light);
        assert_eq!(AppTheme::new(ThemeMode::Dark).iced_theme(), Theme::Dark);
        let _ = ThemeMode::System.is_dark();
    }
}
