// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded from `assets/i18n/`, with
//! an optional external directory for additional or replacement locales.
//!
//! # Features
//!
//! - Locale resolution from CLI, config, then system settings
//! - Runtime language switching
//! - Missing keys render as `MISSING: key`

pub mod fluent;
