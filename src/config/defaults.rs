// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used by the toaster. Constants are organized by category.
//!
//! # Categories
//!
//! - **Stack**: How many cards are visible and how they are spaced
//! - **Timing**: Auto-dismiss lifetime, exit transition, tick cadence
//! - **Gesture**: Swipe-to-dismiss thresholds
//! - **Diagnostics**: Event buffer sizing

// ==========================================================================
// Stack Defaults
// ==========================================================================

/// Default number of cards visible in a collapsed stack.
pub const DEFAULT_VISIBLE_TOASTS: u32 = 3;

/// Minimum number of visible cards.
pub const MIN_VISIBLE_TOASTS: u32 = 1;

/// Maximum number of visible cards.
pub const MAX_VISIBLE_TOASTS: u32 = 20;

/// Default gap between expanded cards (in logical pixels).
pub const DEFAULT_GAP: f32 = 14.0;

/// Default distance between the stack and the viewport edge (in logical pixels).
pub const DEFAULT_VIEWPORT_OFFSET: f32 = 32.0;

/// Default card width (in logical pixels).
pub const DEFAULT_TOAST_WIDTH: f32 = 356.0;

/// Accessible label announced for the notification region.
pub const DEFAULT_CONTAINER_LABEL: &str = "Notifications";

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default lifetime of a toast before it auto-dismisses (in milliseconds).
pub const DEFAULT_TOAST_LIFETIME_MS: u64 = 4000;

/// Time a dismissed card keeps its slot while its exit transition plays.
pub const DEFAULT_EXIT_DURATION_MS: u64 = 200;

/// Interval between lifecycle ticks driven by the host event loop.
pub const TICK_INTERVAL_MS: u64 = 50;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Default swipe distance past which a released card is dismissed.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 20.0;

/// Minimum swipe threshold.
pub const MIN_SWIPE_THRESHOLD: f32 = 1.0;

/// Maximum swipe threshold.
pub const MAX_SWIPE_THRESHOLD: f32 = 200.0;

/// Release velocity (pixels per millisecond) that dismisses regardless of distance.
pub const SWIPE_VELOCITY_THRESHOLD: f32 = 0.11;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default diagnostic event buffer capacity.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostic event buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 50;

/// Maximum diagnostic event buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_VISIBLE_TOASTS > 0);
    assert!(MAX_VISIBLE_TOASTS >= MIN_VISIBLE_TOASTS);
    assert!(DEFAULT_VISIBLE_TOASTS >= MIN_VISIBLE_TOASTS);
    assert!(DEFAULT_VISIBLE_TOASTS <= MAX_VISIBLE_TOASTS);

    assert!(MIN_SWIPE_THRESHOLD > 0.0);
    assert!(MAX_SWIPE_THRESHOLD > MIN_SWIPE_THRESHOLD);
    assert!(DEFAULT_SWIPE_THRESHOLD >= MIN_SWIPE_THRESHOLD);
    assert!(DEFAULT_SWIPE_THRESHOLD <= MAX_SWIPE_THRESHOLD);

    assert!(DEFAULT_EXIT_DURATION_MS < DEFAULT_TOAST_LIFETIME_MS);
    assert!(TICK_INTERVAL_MS < DEFAULT_EXIT_DURATION_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_defaults_are_valid() {
        assert_eq!(DEFAULT_VISIBLE_TOASTS, 3);
        assert!(DEFAULT_GAP > 0.0);
        assert!(DEFAULT_VIEWPORT_OFFSET >= 0.0);
    }

    #[test]
    fn timing_defaults_are_valid() {
        assert_eq!(DEFAULT_TOAST_LIFETIME_MS, 4000);
        assert!(DEFAULT_EXIT_DURATION_MS > TICK_INTERVAL_MS);
    }

    #[test]
    fn swipe_defaults_are_valid() {
        assert_eq!(DEFAULT_SWIPE_THRESHOLD, 20.0);
        assert!(SWIPE_VELOCITY_THRESHOLD > 0.0);
    }
}
