// SPDX-License-Identifier: MPL-2.0
//! `lab_scheduler` is the desktop shell of the IT Lab Scheduler dashboard,
//! built with the Iced GUI framework.
//!
//! It provides a registry of stacked modal dialogs and a queue of timed
//! toast notifications, both drawn over a retained render surface, plus
//! role-specific dashboards that drive them.

#![doc(html_root_url = "https://docs.rs/lab_scheduler/0.1.0")]

pub mod app;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod i18n;
pub mod notifications;
pub mod overlays;
pub mod surface;
pub mod ui;
