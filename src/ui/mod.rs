// SPDX-License-Identifier: MPL-2.0
//! User interface views and styling.
//!
//! Views follow the Elm-style "state down, messages up" pattern. The
//! overlay registry and the notification queue keep their own element
//! trees; the views here only draw those trees and report presses back.
//!
//! # Views
//!
//! - [`dashboard`] - Role picker and the role-specific dashboard page
//! - [`modal`] - Backdrop and stacked dialog layers
//! - [`toast`] - Notification cards
//! - [`surface_view`] - Generic drawing of a render surface subtree
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`widgets`] - Custom iced widgets (spinner)

pub mod dashboard;
pub mod design_tokens;
pub mod modal;
pub mod styles;
pub mod surface_view;
pub mod theming;
pub mod toast;
pub mod widgets;
