// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::dashboard::Role;
use crate::surface::Key;
use crate::ui::dashboard;
use crate::ui::surface_view::SurfaceMessage;
use crate::ui::toast::ToastMessage;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    SignIn(Role),
    Dashboard(dashboard::Message),
    /// Press or edit inside an open dialog.
    Overlay(SurfaceMessage),
    Toast(ToastMessage),
    /// Escape, Tab or Enter from the keyboard.
    Key(Key),
    /// Window gained (`true`) or lost (`false`) focus.
    WindowFocus(bool),
    /// Periodic tick for toast expiry and the loading spinner.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `LAB_SCHEDULER_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Skip the sign-in screen and open this role's dashboard.
    pub role: Option<Role>,
    /// Name shown in the dashboard greeting.
    pub user_name: Option<String>,
}
