// SPDX-License-Identifier: MPL-2.0
//! Modal overlay registry.
//!
//! Overlays are registered once, then opened and closed any number of
//! times. Open overlays form a stack: the top one is the only overlay that
//! reacts to Escape and backdrop clicks, and the page scroll lock is held
//! while the stack is non-empty.
//!
//! # Components
//!
//! - [`Registry`] - registration, stacking, dismissal and focus handling
//! - [`OverlayOptions`] - per-overlay configuration and lifecycle hooks
//! - [`FocusTrap`] - Tab order confined to the active overlay
//!
//! # Example
//!
//! ```
//! use lab_scheduler::overlays::{OverlayOptions, Registry};
//! use lab_scheduler::surface::{Key, MemorySurface, Node};
//!
//! let mut registry = Registry::new(MemorySurface::new())?;
//! let id = registry.create(
//!     Node::text("Lab 204 is booked until noon."),
//!     OverlayOptions::new().title("Lab 204").dismiss_on_escape(false),
//! )?;
//! registry.open(id);
//! registry.handle_key(Key::Escape);
//! assert!(registry.is_open(id));
//! # Ok::<(), lab_scheduler::error::Error>(())
//! ```

mod dialogs;
mod focus;
mod overlay;
mod registry;

pub use dialogs::PROMPT_FIELD;
pub use focus::FocusTrap;
pub use overlay::{ConfirmHook, LifecycleHook, Overlay, OverlayId, OverlayOptions, OverlaySize};
pub use registry::{OverlayEvent, Registry, RegistrySettings};
