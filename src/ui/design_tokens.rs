// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Colors, spacing and sizes used by the dashboard shell, the modal dialogs
and the toast cards. Styles read these instead of literals so the light
and dark schemes stay in step.

- **Palette**: grays, the brand blue scale and one color per severity
- **Opacity**: backdrop dimming and panel translucency
- **Spacing**: 4px steps on an 8px grid
- **Sizing**: fixed widths of cards, toasts and the sign-in form
- **Typography**: font sizes from page title down to timestamps
- **Border**, **Radius**, **Shadow**: card and dialog chrome

```
use lab_scheduler::ui::design_tokens::{opacity, palette, spacing};
use iced::Color;

let backdrop = Color {
    a: opacity::OVERLAY_MEDIUM,
    ..palette::BLACK
};
assert_eq!(spacing::MD, 16.0);
```
"#]

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;

    // Grays, darkest first.
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    // Brand blue. 500 is the primary button and focus accent.
    pub const PRIMARY_200: Color = Color::from_rgb(0.7, 0.84, 0.98);
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);
    pub const PRIMARY_700: Color = Color::from_rgb(0.15, 0.4, 0.7);

    // Toast accents, one per severity. Loading reuses INFO_500.
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

pub mod opacity {
    /// Hover tint on close buttons.
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    /// Modal backdrop.
    pub const OVERLAY_STRONG: f32 = 0.7;
    /// Dialog and toast panels.
    pub const SURFACE: f32 = 0.95;
}

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

pub mod sizing {
    /// Loading spinner inside a dialog.
    pub const ICON_XL: f32 = 48.0;

    pub const TOAST_WIDTH: f32 = 320.0;
    pub const ACTION_CARD_WIDTH: f32 = 200.0;
    pub const SIGN_IN_WIDTH: f32 = 360.0;

    /// Countdown bar under a timed toast.
    pub const TOAST_PROGRESS_HEIGHT: f32 = 3.0;
}

pub mod typography {
    //! Font sizes, largest first.

    /// Sign-in heading and dashboard welcome.
    pub const TITLE_LG: f32 = 30.0;
    /// Dialog titles and the app name in the header.
    pub const TITLE_MD: f32 = 20.0;
    /// Toast icons, action card titles.
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const BODY_SM: f32 = 13.0;
    /// Toast timestamps.
    pub const CAPTION: f32 = 12.0;
}

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    /// Toast severity accent and focus ring.
    pub const WIDTH_MD: f32 = 2.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

pub mod shadow {
    use iced::{Color, Shadow, Vector};

    const fn drop(y: f32, blur_radius: f32) -> Shadow {
        Shadow {
            color: Color::BLACK,
            offset: Vector { x: 0.0, y },
            blur_radius,
        }
    }

    pub const NONE: Shadow = drop(0.0, 0.0);
    pub const SM: Shadow = drop(2.0, 4.0);
    pub const MD: Shadow = drop(4.0, 8.0);
    /// Open dialog.
    pub const LG: Shadow = drop(8.0, 16.0);
}

const _: () = {
    assert!(spacing::XXS > 0.0);
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);
    assert!(spacing::XL > spacing::LG);

    assert!(opacity::OVERLAY_SUBTLE < opacity::OVERLAY_MEDIUM);
    assert!(opacity::OVERLAY_MEDIUM < opacity::OVERLAY_STRONG);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    assert!(sizing::TOAST_WIDTH > sizing::ACTION_CARD_WIDTH);
    assert!(sizing::TOAST_PROGRESS_HEIGHT < spacing::XXS);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY_LG);
    assert!(typography::BODY_LG > typography::BODY);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    assert!(border::WIDTH_MD > border::WIDTH_SM);
    assert!(radius::LG > radius::MD && radius::MD > radius::SM);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_sits_on_the_grid() {
        for step in [
            spacing::XXS,
            spacing::XS,
            spacing::SM,
            spacing::MD,
            spacing::LG,
            spacing::XL,
        ] {
            assert_eq!(step % spacing::XXS, 0.0);
        }
        assert_eq!(spacing::MD, spacing::XS * 2.0);
    }

    #[test]
    fn dialog_shadow_is_the_deepest() {
        assert!(shadow::LG.blur_radius > shadow::MD.blur_radius);
        assert_eq!(shadow::NONE.offset, iced::Vector::ZERO);
    }
}
