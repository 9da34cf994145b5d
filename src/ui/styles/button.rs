// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.
//!
//! Every style takes a `focused` flag: the render surface tracks keyboard
//! focus itself, so the focused control is drawn with a ring instead of
//! relying on iced's own focus state.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn focus_ring(focused: bool, fallback: Color) -> Border {
    if focused {
        Border {
            color: palette::PRIMARY_200,
            width: border::WIDTH_MD,
            radius: radius::SM.into(),
        }
    } else {
        Border {
            color: fallback,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        }
    }
}

/// Main action of a dialog or card (Confirm, OK, sign in).
pub fn primary(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: focus_ring(focused, palette::PRIMARY_500),
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(palette::GRAY_200)),
            text_color: palette::GRAY_400,
            border: focus_ring(false, palette::GRAY_400),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: focus_ring(focused, palette::PRIMARY_600),
            shadow: shadow::SM,
            snap: true,
        },
    }
}

/// Secondary action (Cancel, dashboard quick actions).
pub fn secondary(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let is_light = matches!(theme, Theme::Light);
        let (bg_color, text_color) = if is_light {
            (palette::GRAY_100, palette::GRAY_900)
        } else {
            (palette::GRAY_700, WHITE)
        };

        match status {
            button::Status::Hovered => button::Style {
                background: Some(Background::Color(if is_light {
                    palette::GRAY_200
                } else {
                    Color::from_rgb(0.35, 0.35, 0.35)
                })),
                text_color,
                border: focus_ring(focused, palette::PRIMARY_500),
                shadow: shadow::SM,
                snap: true,
            },
            button::Status::Disabled => button::Style {
                background: Some(Background::Color(bg_color)),
                text_color: palette::GRAY_400,
                border: focus_ring(false, palette::GRAY_400),
                shadow: shadow::NONE,
                snap: true,
            },
            button::Status::Active | button::Status::Pressed => button::Style {
                background: Some(Background::Color(bg_color)),
                text_color,
                border: focus_ring(focused, palette::GRAY_400),
                shadow: shadow::NONE,
                snap: true,
            },
        }
    }
}

/// Borderless glyph button: dialog close control and toast dismiss.
pub fn dismiss(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let base = theme.extended_palette().background.base;
        let background = match status {
            button::Status::Hovered => Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            })),
            button::Status::Pressed => Some(Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::GRAY_400
            })),
            button::Status::Active | button::Status::Disabled => None,
        };
        let border = if focused {
            focus_ring(true, Color::TRANSPARENT)
        } else {
            Border {
                radius: radius::SM.into(),
                ..Default::default()
            }
        };

        button::Style {
            background,
            text_color: base.text,
            border,
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Inline link rendered as a button.
pub fn link(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let is_light = matches!(theme, Theme::Light);
        let text_color = match (status, is_light) {
            (button::Status::Hovered, _) => palette::PRIMARY_400,
            (_, true) => palette::PRIMARY_700,
            (_, false) => palette::PRIMARY_200,
        };
        button::Style {
            background: None,
            text_color,
            border: if focused {
                focus_ring(true, Color::TRANSPARENT)
            } else {
                Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}
