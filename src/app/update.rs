// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Dashboard actions resolve to [`Effect`]s which are presented here, on
//! the overlay registry or the notification queue. Every handler returns
//! the follow-up iced task; the only one in use restores the page scroll
//! once the last dialog closes.

use super::{config, App, Message, PendingJob, Screen};
use crate::dashboard::{self, Effect, Outcome};
use crate::notifications::{NotificationEvent, Severity, Visibility};
use crate::overlays::{OverlayEvent, OverlayOptions, OverlaySize};
use crate::surface::{Key, Node, RenderSurface};
use crate::ui::dashboard::{Message as DashboardMessage, SCROLLABLE_ID};
use crate::ui::surface_view::SurfaceMessage;
use crate::ui::theming::AppTheme;
use crate::ui::toast::ToastMessage;
use crate::ui::widgets::animated_spinner;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{operation, Id};
use iced::Task;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a report or export keeps the loading dialog up.
pub(super) const JOB_DURATION: Duration = Duration::from_millis(1500);

const SHORTCUT_KEYS: [&str; 3] = ["shortcuts-escape", "shortcuts-tab", "shortcuts-enter"];

impl App {
    pub(super) fn update(&mut self, message: Message) -> Task<Message> {
        let was_locked = self.overlays.is_scroll_locked();

        let task = match message {
            Message::SignIn(role) => {
                self.role = role;
                self.screen = Screen::Dashboard;
                info!(%role, "signed in");
                Task::none()
            }
            Message::Dashboard(message) => self.handle_dashboard_message(message),
            Message::Overlay(message) => self.handle_overlay_message(message),
            Message::Toast(message) => {
                self.handle_toast_message(message);
                Task::none()
            }
            Message::Key(key) => self.handle_key(key),
            Message::WindowFocus(focused) => {
                let visibility = if focused {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
                self.notifications.set_visibility(visibility);
                Task::none()
            }
            Message::Tick(now) => {
                self.handle_tick(now);
                Task::none()
            }
        };

        if was_locked && !self.overlays.is_scroll_locked() {
            let offset = self.overlays.surface().scroll_offset();
            debug!(offset, "restoring page scroll");
            let restore = operation::scroll_to(
                Id::new(SCROLLABLE_ID),
                AbsoluteOffset { x: 0.0, y: offset },
            );
            return Task::batch([task, restore]);
        }
        task
    }

    fn handle_dashboard_message(&mut self, message: DashboardMessage) -> Task<Message> {
        match message {
            DashboardMessage::Action(action) => {
                debug!(action = action.name(), "dashboard action");
                self.apply_effect(dashboard::dispatch(action));
            }
            DashboardMessage::ToggleTheme => self.toggle_theme(),
            DashboardMessage::Scrolled(offset) => self.overlays.scroll_page(offset),
        }
        Task::none()
    }

    fn handle_overlay_message(&mut self, message: SurfaceMessage) -> Task<Message> {
        let event = match message {
            SurfaceMessage::Click(element) => self.overlays.handle_click(element),
            SurfaceMessage::Input(element, value) => {
                self.overlays.set_input_value(element, &value);
                None
            }
            SurfaceMessage::Submit(_) => self
                .overlays
                .active()
                .and_then(|id| self.overlays.confirm(id)),
        };
        if let Some(event) = event {
            self.on_overlay_event(event);
        }
        Task::none()
    }

    fn handle_toast_message(&mut self, message: ToastMessage) {
        match message {
            ToastMessage::Pressed(element) => match self.notifications.handle_click(element) {
                Some(NotificationEvent::Action { id, name }) => {
                    info!(notification = %id, action = %name, "notification action");
                }
                Some(NotificationEvent::Clicked(id)) => {
                    debug!(notification = %id, "notification clicked");
                }
                Some(NotificationEvent::Closed(_)) | None => {}
            },
            ToastMessage::Queue(message) => {
                self.notifications.handle_message(&message);
            }
        }
    }

    /// Escape goes to the active dialog first. With no dialog open it
    /// clears the notifications instead.
    fn handle_key(&mut self, key: Key) -> Task<Message> {
        if self.overlays.active().is_none() {
            if key == Key::Escape && !self.notifications.is_empty() {
                self.notifications.close_all();
            }
            return Task::none();
        }

        let event = match self.overlays.handle_key(key) {
            Some(event) => Some(event),
            // Enter presses whichever dialog control holds focus.
            None if key == Key::Enter => self
                .overlays
                .surface()
                .focused()
                .and_then(|element| self.overlays.handle_click(element)),
            None => None,
        };
        if let Some(event) = event {
            self.on_overlay_event(event);
        }
        Task::none()
    }

    fn on_overlay_event(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::Confirmed { id, .. } => {
                if let Some(outcome) = self.confirmations.remove(&id) {
                    self.notify(outcome);
                }
            }
            OverlayEvent::Cancelled(id) | OverlayEvent::Closed(id) => {
                if self.confirmations.remove(&id).is_some() {
                    debug!(overlay = %id, "confirmation dismissed");
                }
            }
            OverlayEvent::Activated { id, element } => {
                debug!(overlay = %id, element = element.raw(), "dialog element activated");
            }
            OverlayEvent::FocusMoved(_) => {}
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        self.notifications.tick();

        let Some(job) = self.job else {
            return;
        };
        if now < job.finishes_at {
            self.spinner_rotation = animated_spinner::advance(self.spinner_rotation);
            return;
        }
        self.job = None;
        self.overlays.close(job.overlay);
        self.notify(job.done);
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Notify(outcome) => self.notify(outcome),
            Effect::Confirm {
                title_key,
                message_key,
                on_confirm,
            } => {
                let options = OverlayOptions::new()
                    .title(self.i18n.tr(title_key))
                    .confirm_label(self.i18n.tr("dialog-confirm"))
                    .cancel_label(self.i18n.tr("dialog-cancel"));
                match self
                    .overlays
                    .show_confirm(&self.i18n.tr(message_key), options)
                {
                    Ok(id) => {
                        self.confirmations.insert(id, on_confirm);
                    }
                    Err(err) => self.report_error("confirm dialog", &err),
                }
            }
            Effect::Progress { message_key, done } => {
                if self.job.is_some() {
                    debug!(message_key, "job already running");
                    return;
                }
                let options = OverlayOptions::new().title(self.i18n.tr("loading-title"));
                match self
                    .overlays
                    .show_loading(&self.i18n.tr(message_key), options)
                {
                    Ok(overlay) => {
                        self.spinner_rotation = 0.0;
                        self.job = Some(PendingJob {
                            overlay,
                            finishes_at: Instant::now() + JOB_DURATION,
                            done,
                        });
                    }
                    Err(err) => self.report_error("loading dialog", &err),
                }
            }
            Effect::ShowShortcuts => self.show_shortcuts(),
            Effect::Logout(outcome) => {
                self.overlays.close_all();
                self.confirmations.clear();
                self.job = None;
                self.screen = Screen::SignIn;
                info!(role = %self.role, "signed out");
                self.notify(outcome);
            }
        }
    }

    fn show_shortcuts(&mut self) {
        let id = match self.shortcuts {
            Some(id) => id,
            None => {
                let content = Node::group(
                    SHORTCUT_KEYS
                        .iter()
                        .map(|key| Node::text(self.i18n.tr(key)))
                        .collect(),
                );
                let options = OverlayOptions::new()
                    .title(self.i18n.tr("shortcuts-title"))
                    .size(OverlaySize::Medium)
                    .confirm_label(self.i18n.tr("dialog-ok"));
                match self.overlays.create(content, options) {
                    Ok(id) => {
                        self.shortcuts = Some(id);
                        id
                    }
                    Err(err) => {
                        self.report_error("shortcuts dialog", &err);
                        return;
                    }
                }
            }
        };
        self.overlays.open(id);
    }

    fn toggle_theme(&mut self) {
        let mode = self.config.general.theme_mode.next();
        self.theme = AppTheme::new(mode);
        self.config.general.theme_mode = mode;

        if let Err(err) = config::save_with_override(&self.config, self.config_dir.clone()) {
            warn!(error = %err, "failed to save settings");
            let text = self.i18n.tr("notification-config-save-error");
            if let Err(err) = self.notifications.error(&text, None) {
                warn!(error = %err, "cannot show notification");
            }
            return;
        }

        let mode_name = self.i18n.tr(mode.label_key());
        let text = self
            .i18n
            .tr_with_args("notification-theme-changed", &[("mode", mode_name.as_str())]);
        if let Err(err) = self.notifications.info(&text, None) {
            warn!(error = %err, "cannot show notification");
        }
    }

    fn notify(&mut self, outcome: Outcome) {
        let text = self.i18n.tr(outcome.key);
        if let Err(err) = self.notifications.show(&text, outcome.severity, None) {
            warn!(key = outcome.key, error = %err, "cannot show notification");
        }
    }

    fn report_error(&mut self, what: &str, err: &crate::error::Error) {
        warn!(error = %err, "cannot show {what}");
        self.notify(Outcome {
            key: "notification-unexpected-error",
            severity: Severity::Error,
        });
    }
}
