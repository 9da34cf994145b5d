// SPDX-License-Identifier: MPL-2.0
//! Notification requests and the records the manager keeps for live ones.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    #[must_use]
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// Severity decides styling and, for [`Severity::Loading`], the default
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
    /// Progress of a running operation. Persistent unless told otherwise.
    Loading,
}

impl Severity {
    /// Class recorded on the notification element.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Severity::Success => "notification-success",
            Severity::Error => "notification-error",
            Severity::Warning => "notification-warning",
            Severity::Info => "notification-info",
            Severity::Loading => "notification-loading",
        }
    }

    /// Glyph drawn in the icon slot.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "\u{2714}",
            Severity::Error => "\u{2716}",
            Severity::Warning => "\u{26a0}",
            Severity::Info => "\u{2139}",
            Severity::Loading => "\u{231b}",
        }
    }

    /// Errors interrupt assistive technology; everything else is polite.
    #[must_use]
    pub fn aria_role(self) -> &'static str {
        match self {
            Severity::Error => "alert",
            _ => "status",
        }
    }
}

/// A labelled button shown inside a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    /// Reported back in [`NotificationEvent::Action`](super::NotificationEvent::Action).
    pub name: String,
    pub label: String,
}

impl NotificationAction {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

pub type NotificationHook = Box<dyn FnMut(NotificationId)>;

/// A notification to be shown.
///
/// # Example
///
/// ```
/// use lab_scheduler::notifications::Notification;
/// use std::time::Duration;
///
/// let saved = Notification::success("Reservation saved")
///     .with_duration(Duration::from_secs(3));
/// let sticky = Notification::info("Maintenance tonight").persistent();
/// # let _ = (saved, sticky);
/// ```
pub struct Notification {
    pub(crate) severity: Severity,
    pub(crate) text: String,
    pub(crate) raw: bool,
    /// `None` takes the manager's default; zero persists.
    pub(crate) duration: Option<Duration>,
    pub(crate) actions: Vec<NotificationAction>,
    pub(crate) dismiss_on_action: bool,
    pub(crate) on_show: Option<NotificationHook>,
    pub(crate) on_close: Option<NotificationHook>,
    pub(crate) on_click: Option<NotificationHook>,
}

impl Notification {
    /// Creates a notification with plain text that is never interpreted as
    /// markup.
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            raw: false,
            duration: None,
            actions: Vec::new(),
            dismiss_on_action: false,
            on_show: None,
            on_close: None,
            on_click: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self::new(Severity::Loading, text)
    }

    /// Creates a notification whose content is trusted markup.
    pub fn html(severity: Severity, markup: impl Into<String>) -> Self {
        Self {
            raw: true,
            ..Self::new(severity, markup)
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Keeps the notification until it is dismissed or evicted.
    #[must_use]
    pub fn persistent(self) -> Self {
        self.with_duration(Duration::ZERO)
    }

    #[must_use]
    pub fn with_action(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.actions.push(NotificationAction::new(name, label));
        self
    }

    /// Closes the notification once any of its actions is pressed.
    #[must_use]
    pub fn dismiss_on_action(mut self, enabled: bool) -> Self {
        self.dismiss_on_action = enabled;
        self
    }

    #[must_use]
    pub fn on_show(mut self, hook: impl FnMut(NotificationId) + 'static) -> Self {
        self.on_show = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_close(mut self, hook: impl FnMut(NotificationId) + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    /// Runs when the notification body (not its close button or actions) is
    /// clicked.
    #[must_use]
    pub fn on_click(mut self, hook: impl FnMut(NotificationId) + 'static) -> Self {
        self.on_click = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("severity", &self.severity)
            .field("text", &self.text)
            .field("raw", &self.raw)
            .field("duration", &self.duration)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

/// Expiry state of a live notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Timer {
    Persistent,
    Running { started: Instant, remaining: Duration },
    Paused { remaining: Duration },
}

impl Timer {
    pub(crate) fn start(duration: Duration, now: Instant, paused: bool) -> Self {
        if duration.is_zero() {
            Timer::Persistent
        } else if paused {
            Timer::Paused {
                remaining: duration,
            }
        } else {
            Timer::Running {
                started: now,
                remaining: duration,
            }
        }
    }

    pub(crate) fn deadline(self) -> Option<Instant> {
        match self {
            Timer::Running { started, remaining } => Some(started + remaining),
            Timer::Persistent | Timer::Paused { .. } => None,
        }
    }

    pub(crate) fn remaining(self, now: Instant) -> Option<Duration> {
        match self {
            Timer::Running { started, remaining } => {
                Some(remaining.saturating_sub(now.saturating_duration_since(started)))
            }
            Timer::Paused { remaining } => Some(remaining),
            Timer::Persistent => None,
        }
    }

    /// Snapshots what is left. Only a running timer can pause.
    pub(crate) fn pause(&mut self, now: Instant) -> bool {
        match self.remaining(now) {
            Some(remaining) if matches!(self, Timer::Running { .. }) => {
                *self = Timer::Paused { remaining };
                true
            }
            _ => false,
        }
    }

    /// Restarts for exactly the snapshot. Only a paused timer can resume.
    pub(crate) fn resume(&mut self, now: Instant) -> bool {
        match *self {
            Timer::Paused { remaining } => {
                *self = Timer::Running {
                    started: now,
                    remaining,
                };
                true
            }
            _ => false,
        }
    }
}

/// A notification currently on screen.
pub struct LiveNotification {
    pub(crate) id: NotificationId,
    pub(crate) severity: Severity,
    pub(crate) text: String,
    pub(crate) raw: bool,
    pub(crate) duration: Duration,
    pub(crate) actions: Vec<NotificationAction>,
    pub(crate) dismiss_on_action: bool,
    pub(crate) created_at: Instant,
    pub(crate) shown_at: DateTime<Local>,
    pub(crate) timer: Timer,
    pub(crate) elements: super::manager::ToastElements,
    pub(crate) on_close: Option<NotificationHook>,
    pub(crate) on_click: Option<NotificationHook>,
}

impl LiveNotification {
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether [`LiveNotification::text`] is trusted markup.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Total lifetime; zero for persistent notifications.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.timer == Timer::Persistent
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self.timer, Timer::Paused { .. })
    }

    #[must_use]
    pub fn actions(&self) -> &[NotificationAction] {
        &self.actions
    }

    /// Monotonic display time; decides eviction order.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Wall-clock display time, for rendering.
    #[must_use]
    pub fn shown_at(&self) -> DateTime<Local> {
        self.shown_at
    }

    /// Root element on the toast surface.
    #[must_use]
    pub fn element(&self) -> crate::surface::ElementId {
        self.elements.root
    }
}

impl fmt::Debug for LiveNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveNotification")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("text", &self.text)
            .field("duration", &self.duration)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
