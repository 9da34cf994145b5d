// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue.
//!
//! Notifications appear immediately, expire on their own unless they are
//! persistent, and can be paused, updated or dismissed at any time. At most
//! `max_visible` are live; showing one more closes the oldest.
//!
//! # Components
//!
//! - [`notification`] - `Notification` requests and severity levels
//! - [`manager`] - `Manager` for the live set, timers and eviction
//!
//! # Usage
//!
//! ```
//! use lab_scheduler::clock::ManualClock;
//! use lab_scheduler::notifications::{Manager, QueueSettings};
//! use lab_scheduler::surface::MemorySurface;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut manager =
//!     Manager::with_clock(MemorySurface::new(), clock.clone(), QueueSettings::default())?;
//!
//! let id = manager.success("Reservation saved", Some(Duration::from_secs(3)))?;
//! clock.advance(Duration::from_secs(3));
//! assert_eq!(manager.tick(), vec![id]);
//! # Ok::<(), lab_scheduler::error::Error>(())
//! ```

pub mod manager;
pub mod notification;

pub use manager::{
    Manager, Message as NotificationMessage, NotificationEvent, Position, QueueSettings,
    Visibility, DEFAULT_DURATION, DEFAULT_MAX_VISIBLE,
};
pub use notification::{
    LiveNotification, Notification, NotificationAction, NotificationHook, NotificationId, Severity,
};
