// SPDX-License-Identifier: MPL-2.0
//! Toaster configuration newtypes.
//!
//! These wrappers keep user-supplied values within valid ranges, so a
//! hand-edited settings file cannot request a stack of zero cards or a
//! swipe threshold that can never be reached.

use super::defaults::{
    DEFAULT_SWIPE_THRESHOLD, DEFAULT_VISIBLE_TOASTS, MAX_SWIPE_THRESHOLD, MAX_VISIBLE_TOASTS,
    MIN_SWIPE_THRESHOLD, MIN_VISIBLE_TOASTS,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// VisibleToasts
// =============================================================================

/// Number of cards shown in a collapsed stack.
///
/// # Example
///
/// ```
/// use iced_toasts::config::VisibleToasts;
///
/// assert_eq!(VisibleToasts::new(5).value(), 5);
/// assert_eq!(VisibleToasts::new(0).value(), 1); // Clamped to min
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct VisibleToasts(u32);

impl VisibleToasts {
    /// Creates a new visible count, clamping to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_VISIBLE_TOASTS, MAX_VISIBLE_TOASTS))
    }

    /// Returns the raw count.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns whether a card at `index` (0 = front) is inside the visible window.
    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index < self.0 as usize
    }
}

impl Default for VisibleToasts {
    fn default() -> Self {
        Self(DEFAULT_VISIBLE_TOASTS)
    }
}

impl From<u32> for VisibleToasts {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<VisibleToasts> for u32 {
    fn from(value: VisibleToasts) -> Self {
        value.0
    }
}

// =============================================================================
// SwipeThreshold
// =============================================================================

/// Swipe distance (logical pixels) past which a released card is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct SwipeThreshold(f32);

impl SwipeThreshold {
    /// Creates a new threshold, clamping to the valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(MIN_SWIPE_THRESHOLD, MAX_SWIPE_THRESHOLD))
    }

    /// Returns the raw distance.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        Self(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl From<f32> for SwipeThreshold {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<SwipeThreshold> for f32 {
    fn from(value: SwipeThreshold) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_toasts_clamps_to_valid_range() {
        assert_eq!(VisibleToasts::new(0).value(), MIN_VISIBLE_TOASTS);
        assert_eq!(VisibleToasts::new(1000).value(), MAX_VISIBLE_TOASTS);
    }

    #[test]
    fn visible_toasts_contains_front_window() {
        let visible = VisibleToasts::new(3);
        assert!(visible.contains(0));
        assert!(visible.contains(2));
        assert!(!visible.contains(3));
    }

    #[test]
    fn swipe_threshold_clamps_to_valid_range() {
        assert_eq!(SwipeThreshold::new(-5.0).value(), MIN_SWIPE_THRESHOLD);
        assert_eq!(SwipeThreshold::new(5000.0).value(), MAX_SWIPE_THRESHOLD);
        assert_eq!(SwipeThreshold::default().value(), DEFAULT_SWIPE_THRESHOLD);
    }
}
