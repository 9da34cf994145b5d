// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` shows notifications on its own toast surface, caps how many
//! are live, and expires them from deadlines checked on every tick. Every
//! way a notification leaves the screen (dismissal, expiry, eviction,
//! `close_all`) goes through [`Manager::close`].

use super::notification::{
    LiveNotification, Notification, NotificationAction, NotificationId, Severity, Timer,
};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::surface::{ElementId, ElementKind, RenderSurface};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Default number of notifications live at once.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Default lifetime of a timed notification.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// Corner or edge of the window the toast stack is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    TopCenter,
    BottomRight,
    BottomLeft,
    BottomCenter,
}

impl Position {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
        }
    }

    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopRight | Position::TopLeft | Position::TopCenter
        )
    }
}

/// Page visibility as reported by the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Queue-wide settings, normally taken from the `[notifications]` config
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSettings {
    pub max_visible: usize,
    pub default_duration: Duration,
    pub position: Position,
    /// Pause every timer while the page is hidden.
    pub pause_when_hidden: bool,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            default_duration: DEFAULT_DURATION,
            position: Position::default(),
            pause_when_hidden: true,
        }
    }
}

/// Pointer hover over a toast. Clicks go through [`Manager::handle_click`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Pointer entered a toast.
    Pause(NotificationId),
    /// Pointer left a toast.
    Resume(NotificationId),
}

/// What a click on the toast surface resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Closed(NotificationId),
    Action { id: NotificationId, name: String },
    Clicked(NotificationId),
}

/// Elements the manager created for one notification.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ToastElements {
    pub root: ElementId,
    pub icon: ElementId,
    pub message: ElementId,
    pub close: ElementId,
    pub progress: Option<ElementId>,
}

/// Live notifications and their timers.
///
/// Operations on unknown ids are silent no-ops. A full queue never rejects
/// a notification: the oldest live one is closed to make room.
pub struct Manager<S: RenderSurface, C: Clock = SystemClock> {
    surface: S,
    clock: C,
    container: ElementId,
    /// Oldest first.
    live: VecDeque<LiveNotification>,
    settings: QueueSettings,
    visibility: Visibility,
}

impl<S: RenderSurface> Manager<S, SystemClock> {
    /// Creates a manager with default settings and the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot create the toast container.
    pub fn new(surface: S) -> Result<Self> {
        Self::with_clock(surface, SystemClock, QueueSettings::default())
    }
}

impl<S: RenderSurface, C: Clock> Manager<S, C> {
    /// # Errors
    ///
    /// Returns an error if the surface cannot create the toast container.
    pub fn with_clock(mut surface: S, clock: C, settings: QueueSettings) -> Result<Self> {
        let root = surface.root();
        let container = surface.create_child(root, ElementKind::Container)?;
        surface.add_class(container, "notifications-container");
        surface.set_attribute(container, "data-position", settings.position.as_str());
        surface.set_attribute(container, "aria-live", "polite");

        Ok(Self {
            surface,
            clock,
            container,
            live: VecDeque::new(),
            settings: QueueSettings {
                max_visible: settings.max_visible.max(1),
                ..settings
            },
            visibility: Visibility::Visible,
        })
    }

    /// Shows a notification, evicting the oldest live one when the queue
    /// is full. A notification that fails to render evicts nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn push(&mut self, notification: Notification) -> Result<NotificationId> {
        let id = NotificationId::new();
        let duration = notification.duration.unwrap_or(match notification.severity {
            Severity::Loading => Duration::ZERO,
            _ => self.settings.default_duration,
        });
        let elements = match self.render(id, &notification, duration) {
            Ok(elements) => elements,
            Err(err) => {
                warn!(notification = %id, error = %err, "failed to render notification");
                return Err(err);
            }
        };

        // Only a rendered notification may take the place of a live one.
        while self.live.len() >= self.settings.max_visible {
            let Some(oldest) = self.live.front().map(|n| n.id) else {
                break;
            };
            debug!(notification = %oldest, "evicting oldest notification");
            self.close(oldest);
        }

        let now = self.clock.now();
        let hidden = self.holds_for_hidden_page();
        let Notification {
            severity,
            text,
            raw,
            actions,
            dismiss_on_action,
            mut on_show,
            on_close,
            on_click,
            ..
        } = notification;

        self.live.push_back(LiveNotification {
            id,
            severity,
            text,
            raw,
            duration,
            actions,
            dismiss_on_action,
            created_at: now,
            shown_at: Local::now(),
            timer: Timer::start(duration, now, hidden),
            elements,
            on_close,
            on_click,
        });
        debug!(notification = %id, ?severity, ?duration, "notification shown");

        if let Some(hook) = on_show.as_mut() {
            hook(id);
        }
        Ok(id)
    }

    fn render(
        &mut self,
        id: NotificationId,
        notification: &Notification,
        duration: Duration,
    ) -> Result<ToastElements> {
        let root = self
            .surface
            .create_child(self.container, ElementKind::Container)?;
        match self.render_parts(id, root, notification, duration) {
            Ok(elements) => Ok(elements),
            Err(err) => {
                self.surface.remove(root);
                Err(err)
            }
        }
    }

    fn render_parts(
        &mut self,
        id: NotificationId,
        root: ElementId,
        notification: &Notification,
        duration: Duration,
    ) -> Result<ToastElements> {
        let surface = &mut self.surface;
        let severity = notification.severity;
        surface.add_class(root, "notification");
        surface.add_class(root, severity.class_name());
        surface.set_attribute(root, "data-notification-id", &id.to_string());
        surface.set_attribute(root, "role", severity.aria_role());

        let progress = if duration.is_zero() {
            None
        } else {
            let progress = surface.create_child(root, ElementKind::Progress)?;
            surface.add_class(progress, "notification-progress");
            surface.set_attribute(progress, "data-duration-ms", &duration.as_millis().to_string());
            Some(progress)
        };

        let content = surface.create_child(root, ElementKind::Container)?;
        surface.add_class(content, "notification-content");

        let icon = surface.create_child(content, ElementKind::Icon)?;
        surface.add_class(icon, "notification-icon");
        surface.set_text(icon, severity.icon());

        let message = surface.create_child(content, ElementKind::Paragraph)?;
        surface.add_class(message, "notification-message");
        if notification.raw {
            surface.set_markup(message, &notification.text);
        } else {
            surface.set_text(message, &notification.text);
        }

        if !notification.actions.is_empty() {
            let row = surface.create_child(content, ElementKind::Container)?;
            surface.add_class(row, "notification-actions");
            for NotificationAction { name, label } in &notification.actions {
                let button = surface.create_child(row, ElementKind::Button)?;
                surface.add_class(button, "notification-action");
                surface.set_attribute(button, "data-action", name);
                surface.set_text(button, label);
            }
        }

        let close = surface.create_child(content, ElementKind::Button)?;
        surface.add_class(close, "notification-close");
        surface.set_attribute(close, "aria-label", "Close notification");
        surface.set_text(close, "\u{00d7}");

        Ok(ToastElements {
            root,
            icon,
            message,
            close,
            progress,
        })
    }

    /// Shows `text` with the given severity. `None` takes the default
    /// duration; `Some(Duration::ZERO)` persists.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn show(
        &mut self,
        text: &str,
        severity: Severity,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        let mut notification = Notification::new(severity, text);
        notification.duration = duration;
        self.push(notification)
    }

    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn success(&mut self, text: &str, duration: Option<Duration>) -> Result<NotificationId> {
        self.show(text, Severity::Success, duration)
    }

    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn error(&mut self, text: &str, duration: Option<Duration>) -> Result<NotificationId> {
        self.show(text, Severity::Error, duration)
    }

    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn warning(&mut self, text: &str, duration: Option<Duration>) -> Result<NotificationId> {
        self.show(text, Severity::Warning, duration)
    }

    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn info(&mut self, text: &str, duration: Option<Duration>) -> Result<NotificationId> {
        self.show(text, Severity::Info, duration)
    }

    /// Shows a progress notification, persistent unless `duration` says
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn loading(&mut self, text: &str, duration: Option<Duration>) -> Result<NotificationId> {
        self.show(text, Severity::Loading, duration)
    }

    /// Shows trusted markup verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn html(
        &mut self,
        markup: &str,
        severity: Severity,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        let mut notification = Notification::html(severity, markup);
        notification.duration = duration;
        self.push(notification)
    }

    /// Shows a notification with action buttons.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn action(
        &mut self,
        text: &str,
        actions: Vec<NotificationAction>,
        severity: Severity,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        let mut notification = Notification::new(severity, text);
        notification.actions = actions;
        notification.duration = duration;
        self.push(notification)
    }

    /// Asks an inline question. The notification persists until one of
    /// the two actions (`confirm` or `cancel`) is pressed, then closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the notification.
    pub fn confirm(
        &mut self,
        text: &str,
        confirm_label: &str,
        cancel_label: &str,
    ) -> Result<NotificationId> {
        self.push(
            Notification::info(text)
                .persistent()
                .with_action("confirm", confirm_label)
                .with_action("cancel", cancel_label)
                .dismiss_on_action(true),
        )
    }

    /// Replaces the text and/or severity of a live notification in place.
    pub fn update(&mut self, id: NotificationId, text: Option<&str>, severity: Option<Severity>) {
        let Some(entry) = self.live.iter_mut().find(|n| n.id == id) else {
            trace!(notification = %id, "update ignored: unknown notification");
            return;
        };
        if let Some(text) = text {
            self.surface.set_text(entry.elements.message, text);
            entry.text = text.to_string();
            entry.raw = false;
        }
        if let Some(severity) = severity.filter(|s| *s != entry.severity) {
            let root = entry.elements.root;
            self.surface.remove_class(root, entry.severity.class_name());
            self.surface.add_class(root, severity.class_name());
            self.surface.set_attribute(root, "role", severity.aria_role());
            self.surface.set_text(entry.elements.icon, severity.icon());
            entry.severity = severity;
        }
    }

    /// Stops the expiry timer and snapshots the time left.
    pub fn pause(&mut self, id: NotificationId) {
        let now = self.clock.now();
        if let Some(entry) = self.live.iter_mut().find(|n| n.id == id) {
            if entry.timer.pause(now) {
                self.surface
                    .set_attribute(entry.elements.root, "data-paused", "true");
            }
        }
    }

    /// Restarts a paused timer for exactly the time that was left.
    pub fn resume(&mut self, id: NotificationId) {
        let now = self.clock.now();
        if let Some(entry) = self.live.iter_mut().find(|n| n.id == id) {
            if entry.timer.resume(now) {
                self.surface
                    .remove_attribute(entry.elements.root, "data-paused");
            }
        }
    }

    pub fn pause_all(&mut self) {
        let ids: Vec<NotificationId> = self.live.iter().map(|n| n.id).collect();
        for id in ids {
            self.pause(id);
        }
    }

    pub fn resume_all(&mut self) {
        let ids: Vec<NotificationId> = self.live.iter().map(|n| n.id).collect();
        for id in ids {
            self.resume(id);
        }
    }

    /// Applies a page visibility change: hidden pauses every timer,
    /// visible resumes them.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        if visibility == self.visibility {
            return;
        }
        self.visibility = visibility;
        if !self.settings.pause_when_hidden {
            return;
        }
        debug!(?visibility, "page visibility changed");
        match visibility {
            Visibility::Hidden => self.pause_all(),
            Visibility::Visible => self.resume_all(),
        }
    }

    /// Removes a live notification and detaches its elements.
    ///
    /// The notification leaves the live set before `on_close` runs, so a
    /// second close for the same id is a no-op.
    pub fn close(&mut self, id: NotificationId) -> bool {
        let Some(position) = self.live.iter().position(|n| n.id == id) else {
            trace!(notification = %id, "close ignored: unknown notification");
            return false;
        };
        let Some(mut entry) = self.live.remove(position) else {
            return false;
        };
        self.surface.remove(entry.elements.root);
        debug!(notification = %id, "notification closed");

        if let Some(hook) = entry.on_close.as_mut() {
            hook(id);
        }
        true
    }

    /// Closes every live notification, oldest first.
    pub fn close_all(&mut self) {
        let ids: Vec<NotificationId> = self.live.iter().map(|n| n.id).collect();
        for id in ids {
            self.close(id);
        }
    }

    /// Closes every notification whose deadline has passed and returns
    /// their ids.
    pub fn tick(&mut self) -> Vec<NotificationId> {
        let now = self.clock.now();
        let expired: Vec<NotificationId> = self
            .live
            .iter()
            .filter(|n| n.timer.deadline().is_some_and(|deadline| deadline <= now))
            .map(LiveNotification::id)
            .collect();

        for id in &expired {
            debug!(notification = %id, "notification expired");
            self.close(*id);
        }
        expired
    }

    /// Routes a click on `target` to the notification that contains it.
    pub fn handle_click(&mut self, target: ElementId) -> Option<NotificationEvent> {
        let entry = self
            .live
            .iter_mut()
            .find(|n| self.surface.contains(n.elements.root, target))?;
        let id = entry.id;

        if target == entry.elements.close {
            self.close(id);
            return Some(NotificationEvent::Closed(id));
        }

        if let Some(name) = self.surface.attribute(target, "data-action") {
            if entry.dismiss_on_action {
                self.close(id);
            }
            return Some(NotificationEvent::Action { id, name });
        }

        if let Some(hook) = entry.on_click.as_mut() {
            hook(id);
        }
        Some(NotificationEvent::Clicked(id))
    }

    /// Handles a hover message. Leaving a toast does not restart its
    /// countdown while a hidden page holds every timer.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Pause(id) => self.pause(*id),
            Message::Resume(id) => {
                if !self.holds_for_hidden_page() {
                    self.resume(*id);
                }
            }
        }
    }

    fn holds_for_hidden_page(&self) -> bool {
        self.visibility == Visibility::Hidden && self.settings.pause_when_hidden
    }

    /// Applies new queue settings. Shrinking the cap evicts the oldest
    /// notifications down to it. Turning `pause_when_hidden` off while the
    /// page is hidden restarts the held timers; turning it on holds them.
    pub fn configure(&mut self, settings: QueueSettings) {
        let settings = QueueSettings {
            max_visible: settings.max_visible.max(1),
            ..settings
        };
        if settings.position != self.settings.position {
            self.surface
                .set_attribute(self.container, "data-position", settings.position.as_str());
        }
        let held = self.holds_for_hidden_page();
        self.settings = settings;
        match (held, self.holds_for_hidden_page()) {
            (true, false) => self.resume_all(),
            (false, true) => self.pause_all(),
            _ => {}
        }

        while self.live.len() > self.settings.max_visible {
            let Some(oldest) = self.live.front().map(|n| n.id) else {
                break;
            };
            self.close(oldest);
        }
    }

    #[must_use]
    pub fn settings(&self) -> QueueSettings {
        self.settings
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Live notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LiveNotification> {
        self.live.iter()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&LiveNotification> {
        self.live.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn exists(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[must_use]
    pub fn is_paused(&self, id: NotificationId) -> bool {
        self.get(id).is_some_and(LiveNotification::is_paused)
    }

    /// Time left before `id` expires. `None` for persistent or unknown
    /// notifications.
    #[must_use]
    pub fn remaining(&self, id: NotificationId) -> Option<Duration> {
        let now = self.clock.now();
        self.get(id).and_then(|n| n.timer.remaining(now))
    }

    /// Earliest running deadline, if any timer is running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.live.iter().filter_map(|n| n.timer.deadline()).min()
    }

    /// The element every toast hangs from.
    #[must_use]
    pub fn container(&self) -> ElementId {
        self.container
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::surface::MemorySurface;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> (Manager<MemorySurface, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let manager =
            Manager::with_clock(MemorySurface::new(), clock.clone(), QueueSettings::default())
                .unwrap();
        (manager, clock)
    }

    #[test]
    fn new_manager_is_empty() {
        let (manager, _) = manager();
        assert_eq!(manager.count(), 0);
        assert!(manager.next_deadline().is_none());
    }

    #[test]
    fn show_renders_into_the_container() {
        let (mut manager, _) = manager();
        let id = manager.success("Saved", None).unwrap();

        let live = manager.get(id).unwrap();
        let surface = manager.surface();
        let element = surface.element(live.element()).unwrap();
        assert_eq!(element.parent(), Some(manager.container()));
        assert!(element.has_class("notification-success"));
        assert_eq!(element.attribute("data-notification-id"), Some(id.to_string().as_str()));
        assert_eq!(live.duration(), DEFAULT_DURATION);
    }

    #[test]
    fn text_is_escaped_unless_raw() {
        let (mut manager, _) = manager();
        let plain = manager.info("<script>x</script>", None).unwrap();
        let raw = manager.html("<b>bold</b>", Severity::Info, None).unwrap();

        let surface = manager.surface();
        let message = |id| {
            let el = manager.get(id).unwrap().elements.message;
            surface.element(el).unwrap().clone()
        };
        assert_eq!(message(plain).markup(), "&lt;script&gt;x&lt;/script&gt;");
        assert!(!message(plain).is_raw());
        assert_eq!(message(raw).markup(), "<b>bold</b>");
        assert!(message(raw).is_raw());
    }

    #[test]
    fn expires_when_the_deadline_passes() {
        let (mut manager, clock) = manager();
        let id = manager.success("Saved", Some(Duration::from_millis(3000))).unwrap();

        clock.advance_ms(2999);
        assert!(manager.tick().is_empty());
        assert!(manager.exists(id));

        clock.advance_ms(1);
        assert_eq!(manager.tick(), vec![id]);
        assert!(!manager.exists(id));
    }

    #[test]
    fn zero_duration_never_expires() {
        let (mut manager, clock) = manager();
        let id = manager.info("Sticky", Some(Duration::ZERO)).unwrap();

        clock.advance(Duration::from_secs(3600));
        assert!(manager.tick().is_empty());
        assert!(manager.exists(id));
        assert!(manager.get(id).unwrap().is_persistent());
        assert!(manager.remaining(id).is_none());
    }

    #[test]
    fn loading_defaults_to_persistent() {
        let (mut manager, clock) = manager();
        let id = manager.loading("Exporting", None).unwrap();
        clock.advance(Duration::from_secs(60));
        manager.tick();
        assert!(manager.exists(id));
    }

    #[test]
    fn sixth_message_evicts_the_oldest() {
        let (mut manager, _) = manager();
        let ids: Vec<_> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|text| manager.info(text, None).unwrap())
            .collect();

        assert_eq!(manager.count(), 5);
        assert!(!manager.exists(ids[0]));
        let live: Vec<_> = manager.iter().map(LiveNotification::text).collect();
        assert_eq!(live, vec!["B", "C", "D", "E", "F"]);
    }

    #[test]
    fn eviction_runs_the_close_hook() {
        let closed = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&closed);
        let (mut manager, _) = manager();
        let first = manager
            .push(Notification::info("first").on_close(move |id| log.borrow_mut().push(id)))
            .unwrap();
        for _ in 0..5 {
            manager.info("more", None).unwrap();
        }
        assert_eq!(*closed.borrow(), vec![first]);
    }

    #[test]
    fn pause_then_resume_keeps_the_remaining_time() {
        let (mut manager, clock) = manager();
        let id = manager.info("Heads up", Some(Duration::from_millis(5000))).unwrap();

        clock.advance_ms(1000);
        manager.pause(id);
        assert!(manager.is_paused(id));
        assert_eq!(manager.remaining(id), Some(Duration::from_millis(4000)));

        clock.advance_ms(10_000);
        manager.tick();
        assert!(manager.exists(id));

        manager.resume(id);
        clock.advance_ms(1500);
        manager.pause(id);
        assert_eq!(manager.remaining(id), Some(Duration::from_millis(2500)));
        manager.resume(id);

        clock.advance_ms(2499);
        manager.tick();
        assert!(manager.exists(id));
        clock.advance_ms(1);
        manager.tick();
        assert!(!manager.exists(id));
    }

    #[test]
    fn hidden_page_pauses_every_timer() {
        let (mut manager, clock) = manager();
        let a = manager.info("a", Some(Duration::from_millis(1000))).unwrap();
        let b = manager.info("b", Some(Duration::from_millis(2000))).unwrap();

        manager.set_visibility(Visibility::Hidden);
        assert!(manager.is_paused(a) && manager.is_paused(b));
        clock.advance(Duration::from_secs(30));
        assert!(manager.tick().is_empty());

        manager.set_visibility(Visibility::Visible);
        assert!(!manager.is_paused(a));
        clock.advance_ms(1000);
        assert_eq!(manager.tick(), vec![a]);
    }

    #[test]
    fn shown_while_hidden_starts_paused() {
        let (mut manager, clock) = manager();
        manager.set_visibility(Visibility::Hidden);
        let id = manager.info("queued", Some(Duration::from_millis(500))).unwrap();
        clock.advance_ms(5000);
        manager.tick();
        assert!(manager.is_paused(id));
    }

    #[test]
    fn update_changes_text_and_severity_in_place() {
        let (mut manager, _) = manager();
        let id = manager.loading("Saving...", None).unwrap();
        let element = manager.get(id).unwrap().element();

        manager.update(id, Some("Saved"), Some(Severity::Success));

        let live = manager.get(id).unwrap();
        assert_eq!(live.text(), "Saved");
        assert_eq!(live.severity(), Severity::Success);
        let root = manager.surface().element(element).unwrap();
        assert!(root.has_class("notification-success"));
        assert!(!root.has_class("notification-loading"));
    }

    #[test]
    fn close_is_idempotent() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let (mut manager, clock) = manager();
        let id = manager
            .push(
                Notification::info("bye")
                    .with_duration(Duration::from_millis(100))
                    .on_close(move |_| *counter.borrow_mut() += 1),
            )
            .unwrap();
        let element = manager.get(id).unwrap().element();

        assert!(manager.close(id));
        clock.advance_ms(200);
        assert!(manager.tick().is_empty());
        assert!(!manager.close(id));
        assert_eq!(*calls.borrow(), 1);
        assert!(!manager.surface().exists(element));
    }

    #[test]
    fn clicks_resolve_close_action_and_body() {
        let (mut manager, _) = manager();
        let id = manager.confirm("Remove booking?", "Yes", "No").unwrap();
        let root = manager.get(id).unwrap().element();
        let surface = manager.surface();
        let yes = surface.find_by_attribute(root, "data-action", "confirm").unwrap();
        let icon = manager.get(id).unwrap().elements.icon;

        assert_eq!(manager.handle_click(icon), Some(NotificationEvent::Clicked(id)));
        assert_eq!(
            manager.handle_click(yes),
            Some(NotificationEvent::Action {
                id,
                name: "confirm".to_string()
            })
        );
        assert!(!manager.exists(id));

        let other = manager.warning("Careful", None).unwrap();
        let close = manager.get(other).unwrap().elements.close;
        assert_eq!(manager.handle_click(close), Some(NotificationEvent::Closed(other)));
        assert_eq!(manager.handle_click(close), None);
    }

    #[test]
    fn shrinking_the_cap_evicts_oldest() {
        let (mut manager, _) = manager();
        let ids: Vec<_> = (0..5).map(|i| manager.info(&i.to_string(), None).unwrap()).collect();

        manager.configure(QueueSettings {
            max_visible: 2,
            position: Position::BottomLeft,
            ..QueueSettings::default()
        });

        assert_eq!(manager.count(), 2);
        assert!(manager.exists(ids[3]) && manager.exists(ids[4]));
        let container = manager.surface().element(manager.container()).unwrap();
        assert_eq!(container.attribute("data-position"), Some("bottom-left"));
    }

    #[test]
    fn unavailable_surface_propagates_and_queue_stays_usable() {
        let (mut manager, _) = manager();
        let kept = manager.info("kept", None).unwrap();
        let mut broken = Manager::with_clock(
            MemorySurface::new(),
            ManualClock::new(),
            QueueSettings::default(),
        )
        .unwrap();
        broken.surface.set_available(false);

        assert!(broken.info("lost", None).is_err());
        assert_eq!(broken.count(), 0);
        assert!(manager.exists(kept));
    }

    #[test]
    fn next_deadline_is_the_earliest_running_timer() {
        let (mut manager, clock) = manager();
        let start = clock.now();
        manager.info("long", Some(Duration::from_secs(10))).unwrap();
        let short = manager.info("short", Some(Duration::from_secs(2))).unwrap();
        assert_eq!(manager.next_deadline(), Some(start + Duration::from_secs(2)));

        manager.pause(short);
        assert_eq!(manager.next_deadline(), Some(start + Duration::from_secs(10)));
    }

    #[test]
    fn hover_exit_on_a_hidden_page_keeps_the_hold() {
        let (mut manager, clock) = manager();
        let id = manager.info("x", Some(Duration::from_millis(10))).unwrap();
        manager.set_visibility(Visibility::Hidden);
        manager.handle_message(&Message::Pause(id));
        manager.handle_message(&Message::Resume(id));
        clock.advance_ms(60_000);
        assert!(manager.tick().is_empty());
        assert!(manager.is_paused(id));
    }

    #[test]
    fn disabling_the_hidden_hold_restarts_held_timers() {
        let (mut manager, clock) = manager();
        let id = manager.info("x", Some(Duration::from_millis(1000))).unwrap();
        manager.set_visibility(Visibility::Hidden);
        manager.configure(QueueSettings {
            pause_when_hidden: false,
            ..manager.settings()
        });
        assert!(!manager.is_paused(id));

        manager.set_visibility(Visibility::Visible);
        clock.advance(Duration::from_secs(3600));
        assert_eq!(manager.tick(), vec![id]);
        assert!(!manager.exists(id));
    }

    #[test]
    fn enabling_the_hidden_hold_while_hidden_pauses_timers() {
        let (mut manager, clock) = manager();
        manager.configure(QueueSettings {
            pause_when_hidden: false,
            ..manager.settings()
        });
        let id = manager.info("x", Some(Duration::from_millis(1000))).unwrap();
        manager.set_visibility(Visibility::Hidden);
        assert!(!manager.is_paused(id));

        manager.configure(QueueSettings {
            pause_when_hidden: true,
            ..manager.settings()
        });
        clock.advance_ms(5000);
        assert!(manager.tick().is_empty());

        manager.set_visibility(Visibility::Visible);
        clock.advance_ms(1000);
        assert_eq!(manager.tick(), vec![id]);
    }

    #[test]
    fn failed_show_keeps_the_full_queue_intact() {
        let (mut manager, _clock) = manager();
        let closed = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&closed);
        let oldest = manager
            .push(Notification::info("first").on_close(move |_| *counter.borrow_mut() += 1))
            .unwrap();
        for n in 1..DEFAULT_MAX_VISIBLE {
            manager.info(&format!("toast {n}"), None).unwrap();
        }

        manager.surface.set_available(false);
        assert!(manager.info("lost", None).is_err());
        assert_eq!(manager.count(), DEFAULT_MAX_VISIBLE);
        assert!(manager.exists(oldest));
        assert_eq!(*closed.borrow(), 0);

        manager.surface.set_available(true);
        manager.info("kept", None).unwrap();
        assert!(!manager.exists(oldest));
        assert_eq!(*closed.borrow(), 1);
    }
}
