// SPDX-License-Identifier: MPL-2.0
//! Dashboard roles, actions and what each action does.
//!
//! Actions form a closed set resolved by an exhaustive match, so adding
//! one without deciding its effect does not compile. Effects describe what
//! the shell should present; they never touch the overlay registry or the
//! notification queue themselves.

use crate::notifications::Severity;
use std::fmt;
use std::str::FromStr;

/// Who is signed in. Decides which actions the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    Instructor,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Instructor, Role::Student];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        }
    }

    /// i18n key of the role's display name.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Role::Admin => "role-admin",
            Role::Instructor => "role-instructor",
            Role::Student => "role-student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown role '{}' (expected admin, instructor or student)",
            self.0
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "instructor" => Ok(Role::Instructor),
            "student" => Ok(Role::Student),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// Everything a dashboard button can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateLab,
    CreateReservation,
    ViewSchedule,
    Refresh,
    Logout,
    QuickSchedule,
    BulkSchedule,
    ResourceAllocator,
    AnalyticsDashboard,
    ApproveAllPending,
    RejectAllPending,
    UtilizationReport,
    ConflictReport,
    ExportSchedule,
    KeyboardShortcuts,
}

const ADMIN_ACTIONS: &[Action] = &[
    Action::CreateLab,
    Action::ApproveAllPending,
    Action::RejectAllPending,
    Action::ResourceAllocator,
    Action::AnalyticsDashboard,
    Action::UtilizationReport,
    Action::ConflictReport,
    Action::ExportSchedule,
    Action::Refresh,
    Action::KeyboardShortcuts,
    Action::Logout,
];

const INSTRUCTOR_ACTIONS: &[Action] = &[
    Action::QuickSchedule,
    Action::BulkSchedule,
    Action::CreateReservation,
    Action::ViewSchedule,
    Action::ExportSchedule,
    Action::Refresh,
    Action::KeyboardShortcuts,
    Action::Logout,
];

const STUDENT_ACTIONS: &[Action] = &[
    Action::CreateReservation,
    Action::ViewSchedule,
    Action::Refresh,
    Action::KeyboardShortcuts,
    Action::Logout,
];

impl Action {
    /// Actions shown on the dashboard of `role`, in display order.
    #[must_use]
    pub fn for_role(role: Role) -> &'static [Action] {
        match role {
            Role::Admin => ADMIN_ACTIONS,
            Role::Instructor => INSTRUCTOR_ACTIONS,
            Role::Student => STUDENT_ACTIONS,
        }
    }

    /// Stable kebab-case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Action::CreateLab => "create-lab",
            Action::CreateReservation => "create-reservation",
            Action::ViewSchedule => "view-schedule",
            Action::Refresh => "refresh",
            Action::Logout => "logout",
            Action::QuickSchedule => "quick-schedule",
            Action::BulkSchedule => "bulk-schedule",
            Action::ResourceAllocator => "resource-allocator",
            Action::AnalyticsDashboard => "analytics-dashboard",
            Action::ApproveAllPending => "approve-all-pending",
            Action::RejectAllPending => "reject-all-pending",
            Action::UtilizationReport => "utilization-report",
            Action::ConflictReport => "conflict-report",
            Action::ExportSchedule => "export-schedule",
            Action::KeyboardShortcuts => "keyboard-shortcuts",
        }
    }

    /// i18n key of the button label.
    #[must_use]
    pub fn label_key(self) -> String {
        format!("action-{}", self.name())
    }
}

/// A notification to show: i18n key and severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub key: &'static str,
    pub severity: Severity,
}

impl Outcome {
    const fn info(key: &'static str) -> Self {
        Self {
            key,
            severity: Severity::Info,
        }
    }

    const fn success(key: &'static str) -> Self {
        Self {
            key,
            severity: Severity::Success,
        }
    }
}

/// What the shell should present for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Notify(Outcome),
    /// Ask first; notify `on_confirm` if the user agrees.
    Confirm {
        title_key: &'static str,
        message_key: &'static str,
        on_confirm: Outcome,
    },
    /// Show a blocking loading dialog, then notify `done`.
    Progress {
        message_key: &'static str,
        done: Outcome,
    },
    /// Reopen the retained keyboard shortcuts overlay.
    ShowShortcuts,
    /// Return to the sign-in screen, then notify.
    Logout(Outcome),
}

/// Resolves an action to its effect.
#[must_use]
pub fn dispatch(action: Action) -> Effect {
    match action {
        Action::CreateLab => Effect::Notify(Outcome::info("stub-create-lab")),
        Action::CreateReservation => Effect::Notify(Outcome::info("stub-create-reservation")),
        Action::ViewSchedule => Effect::Notify(Outcome::info("notification-schedule-loaded")),
        Action::Refresh => Effect::Notify(Outcome::success("notification-data-refreshed")),
        Action::Logout => Effect::Logout(Outcome::info("notification-logged-out")),
        Action::QuickSchedule => Effect::Notify(Outcome::info("stub-quick-schedule")),
        Action::BulkSchedule => Effect::Notify(Outcome::info("stub-bulk-schedule")),
        Action::ResourceAllocator => Effect::Notify(Outcome::info("stub-resource-allocator")),
        Action::AnalyticsDashboard => Effect::Notify(Outcome::info("stub-analytics-dashboard")),
        Action::ApproveAllPending => Effect::Confirm {
            title_key: "confirm-title",
            message_key: "confirm-approve-all",
            on_confirm: Outcome::info("notification-approving-all"),
        },
        Action::RejectAllPending => Effect::Confirm {
            title_key: "confirm-title",
            message_key: "confirm-reject-all",
            on_confirm: Outcome::info("notification-rejecting-all"),
        },
        Action::UtilizationReport => Effect::Progress {
            message_key: "notification-generating-utilization",
            done: Outcome::success("notification-report-ready"),
        },
        Action::ConflictReport => Effect::Progress {
            message_key: "notification-generating-conflict",
            done: Outcome::success("notification-report-ready"),
        },
        Action::ExportSchedule => Effect::Progress {
            message_key: "notification-exporting-schedule",
            done: Outcome::success("notification-export-ready"),
        },
        Action::KeyboardShortcuts => Effect::ShowShortcuts,
    }
}
