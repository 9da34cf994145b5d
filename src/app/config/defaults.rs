// SPDX-License-Identifier: MPL-2.0
//! Default values and bounds for configuration settings.

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default number of toasts shown at once.
pub const DEFAULT_MAX_VISIBLE: usize = crate::notifications::DEFAULT_MAX_VISIBLE;

/// Minimum number of toasts shown at once.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Maximum number of toasts shown at once.
pub const MAX_MAX_VISIBLE: usize = 20;

/// Default toast lifetime in milliseconds. Zero keeps toasts until dismissed.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Longest toast lifetime accepted from the config file (ten minutes).
pub const MAX_DURATION_MS: u64 = 600_000;

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// z-index of the backdrop under the first open overlay.
pub const DEFAULT_Z_INDEX_BASE: i32 = 1000;

// ==========================================================================
// Tick
// ==========================================================================

/// Interval between expiry checks while toasts are live (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_visible_default_is_within_bounds() {
        assert!((MIN_MAX_VISIBLE..=MAX_MAX_VISIBLE).contains(&DEFAULT_MAX_VISIBLE));
    }

    #[test]
    fn duration_default_is_within_bounds() {
        assert!(DEFAULT_DURATION_MS <= MAX_DURATION_MS);
        assert!(TICK_INTERVAL_MS < DEFAULT_DURATION_MS);
    }
}
