// SPDX-License-Identifier: MPL-2.0
//! Swipe gesture tracking
//!
//! Follows a pointer from press to release and decides whether the card was
//! flung off screen. Displacement is only accepted along the directions the
//! card's position allows, so a bottom-right card can be pushed down or right
//! but never up.

use super::notification::{HorizontalEdge, Position, VerticalEdge};
use crate::config::{SwipeThreshold, SWIPE_VELOCITY_THRESHOLD};
use iced::{Point, Vector};
use std::time::Instant;

/// Direction a card may be swiped out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Directions allowed for a card anchored at `position`.
    ///
    /// The vertical edge is always allowed; the horizontal one only when the
    /// card is not centered.
    #[must_use]
    pub fn allowed_for(position: Position) -> Vec<SwipeDirection> {
        let mut directions = vec![match position.vertical() {
            VerticalEdge::Top => SwipeDirection::Up,
            VerticalEdge::Bottom => SwipeDirection::Down,
        }];
        match position.horizontal() {
            HorizontalEdge::Left => directions.push(SwipeDirection::Left),
            HorizontalEdge::Right => directions.push(SwipeDirection::Right),
            HorizontalEdge::Center => {}
        }
        directions
    }
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Far or fast enough: the card leaves.
    SwipedOut,
    /// Released short of the threshold: the card snaps back.
    SwipedBack,
    /// No gesture was in progress.
    NotSwiped,
}

/// Manages press-drag-release state for one card
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(Point, Instant)>,
    offset: Vector,
}

impl SwipeTracker {
    /// Starts tracking at `position`.
    pub fn start(&mut self, position: Point, now: Instant) {
        self.start = Some((position, now));
        self.offset = Vector::ZERO;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Current clamped displacement, used to translate the card while dragging.
    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    /// Updates the displacement for a pointer now at `position`.
    pub fn moved(&mut self, position: Point, allowed: &[SwipeDirection]) -> Vector {
        let Some((start, _)) = self.start else {
            return Vector::ZERO;
        };

        let delta = position - start;
        let x = if allowed.contains(&SwipeDirection::Left) {
            delta.x.min(0.0)
        } else if allowed.contains(&SwipeDirection::Right) {
            delta.x.max(0.0)
        } else {
            0.0
        };
        let y = if allowed.contains(&SwipeDirection::Up) {
            delta.y.min(0.0)
        } else if allowed.contains(&SwipeDirection::Down) {
            delta.y.max(0.0)
        } else {
            0.0
        };

        self.offset = Vector::new(x, y);
        self.offset
    }

    /// Ends the gesture and classifies it.
    pub fn end(
        &mut self,
        position: Point,
        now: Instant,
        allowed: &[SwipeDirection],
        threshold: SwipeThreshold,
    ) -> SwipeOutcome {
        let Some((_, started_at)) = self.start else {
            return SwipeOutcome::NotSwiped;
        };

        let offset = self.moved(position, allowed);
        self.cancel();

        let distance = offset.x.abs().max(offset.y.abs());
        let elapsed_ms = now.saturating_duration_since(started_at).as_secs_f32() * 1000.0;
        let velocity = if elapsed_ms > 0.0 {
            distance / elapsed_ms
        } else {
            0.0
        };

        if distance >= threshold.value() || velocity > SWIPE_VELOCITY_THRESHOLD {
            SwipeOutcome::SwipedOut
        } else {
            SwipeOutcome::SwipedBack
        }
    }

    /// Drops the gesture without classifying it.
    pub fn cancel(&mut self) {
        self.start = None;
        self.offset = Vector::ZERO;
    }
}
