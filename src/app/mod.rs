// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the dashboard shell.
//!
//! The `App` owns the overlay registry and the notification queue, each on
//! its own render surface, and translates dashboard effects into dialogs
//! and toasts. Nothing here is global: tests build an `App` directly and
//! drive it through `update`.

pub mod config;
mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::dashboard::{Outcome, Role};
use crate::error::Result;
use crate::i18n::fluent::I18n;
use crate::notifications::Manager;
use crate::overlays::{OverlayId, Registry};
use crate::surface::MemorySurface;
use crate::ui::theming::AppTheme;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// A loading dialog standing in for a long-running job.
#[derive(Debug, Clone, Copy)]
struct PendingJob {
    overlay: OverlayId,
    finishes_at: Instant,
    done: Outcome,
}

/// Root iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    role: Role,
    user_name: Option<String>,
    theme: AppTheme,
    config: config::Config,
    config_dir: Option<PathBuf>,
    overlays: Registry<MemorySurface>,
    notifications: Manager<MemorySurface>,
    /// Open confirm dialogs and what to announce when they are accepted.
    confirmations: HashMap<OverlayId, Outcome>,
    job: Option<PendingJob>,
    /// Retained keyboard shortcuts dialog, created on first use.
    shortcuts: Option<OverlayId>,
    spinner_rotation: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("role", &self.role)
            .field("open_overlays", &self.overlays.open_count())
            .field("notifications", &self.notifications.count())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(app: App) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; the app is handed over once.
    let boot_state = RefCell::new(Some(app));
    let boot = move || {
        let app = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        (app, Task::none())
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads settings and translations and builds both presentation
    /// components.
    ///
    /// # Errors
    ///
    /// Returns an error if a render surface cannot be set up.
    pub fn new(flags: Flags) -> Result<Self> {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let i18n = I18n::new(
            flags.lang,
            flags.i18n_dir.as_deref().map(Path::new),
            &config,
        );

        let overlays =
            Registry::with_settings(MemorySurface::new(), config.overlays.registry_settings())?;
        let notifications = Manager::with_clock(
            MemorySurface::new(),
            crate::clock::SystemClock,
            config.notifications.queue_settings(),
        )?;

        let mut app = Self {
            i18n,
            screen: flags.role.map_or(Screen::SignIn, |_| Screen::Dashboard),
            role: flags.role.unwrap_or_default(),
            user_name: flags.user_name,
            theme: AppTheme::new(config.general.theme_mode),
            config,
            config_dir,
            overlays,
            notifications,
            confirmations: HashMap::new(),
            job: None,
            shortcuts: None,
            spinner_rotation: 0.0,
        };

        if let Some(key) = config_warning {
            let text = app.i18n.tr(&key);
            if let Err(err) = app.notifications.warning(&text, None) {
                warn!(error = %err, "cannot show settings warning");
            }
        }
        info!(locale = %app.i18n.current_locale(), screen = ?app.screen, "application ready");
        Ok(app)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("app-title");
        match self.screen {
            Screen::SignIn => format!("{} - {app_name}", self.i18n.tr("sign-in-title")),
            Screen::Dashboard => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(
            !self.notifications.is_empty(),
            self.job.is_some(),
        );
        Subscription::batch([event_sub, tick_sub])
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            role: self.role,
            user_name: self.user_name.as_deref(),
            theme: &self.theme,
            overlays: &self.overlays,
            notifications: &self.notifications,
            spinner_rotation: self.spinner_rotation,
        })
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn overlays(&self) -> &Registry<MemorySurface> {
        &self.overlays
    }

    #[must_use]
    pub fn notifications(&self) -> &Manager<MemorySurface> {
        &self.notifications
    }

    #[must_use]
    pub fn config(&self) -> &config::Config {
        &self.config
    }
}
