// SPDX-License-Identifier: MPL-2.0
//! Per-toast lifecycle: countdown, pause/resume, swipe and exit.
//!
//! A card is driven entirely by the surface with explicit timestamps. Each
//! transition that the surface must react to (invoking a callback, removing
//! the toast) is returned as a [`CardEffect`]; transitions are idempotent, so a
//! timer firing after a swipe or a second dismiss request produce nothing.

use super::notification::{Position, Toast, ToastDuration, ToastId, ToastKind};
use super::swipe::{SwipeDirection, SwipeOutcome, SwipeTracker};
use crate::config::{ActionPolicy, SwipeThreshold, ToasterConfig};
use iced::{Point, Vector};
use std::time::{Duration, Instant};

/// Auto-dismiss countdown that survives pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
    armed_at: Option<Instant>,
}

impl Countdown {
    /// Creates an unarmed countdown for `total`.
    #[must_use]
    pub fn new(total: Duration) -> Self {
        Self {
            remaining: total,
            armed_at: None,
        }
    }

    /// Starts counting from `now`. No-op when already armed.
    pub fn arm(&mut self, now: Instant) {
        if self.armed_at.is_none() {
            self.armed_at = Some(now);
        }
    }

    /// Stops counting and banks the time left.
    pub fn pause(&mut self, now: Instant) {
        self.remaining = self.remaining_at(now);
        self.armed_at = None;
    }

    /// Stops counting for good.
    pub fn cancel(&mut self) {
        self.armed_at = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match self.armed_at {
            Some(armed_at) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(armed_at)),
            None => self.remaining,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.is_armed() && self.remaining_at(now).is_zero()
    }
}

/// Why a card started its exit transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The countdown ran out.
    AutoClose,
    /// Close button, action/cancel click or a dismiss request.
    Explicit,
    Swipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Mounted; counting down if the toast has a lifetime.
    Idle,
    Paused,
    Dismissing {
        since: Instant,
        reason: DismissReason,
    },
    Removed,
}

/// Transition the surface has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    Paused,
    Resumed,
    Dismissed(DismissReason),
    Removed,
}

/// Inputs that decide the countdown length; a change re-arms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timing {
    kind: ToastKind,
    duration: Option<ToastDuration>,
    has_action: bool,
}

impl Timing {
    fn of(toast: &Toast) -> Self {
        Self {
            kind: toast.kind,
            duration: toast.duration,
            has_action: toast.action.is_some(),
        }
    }
}

/// Lifetime of a toast, or `None` when it must be dismissed explicitly.
#[must_use]
pub fn lifetime(toast: &Toast, config: &ToasterConfig) -> Option<Duration> {
    if toast.kind == ToastKind::Loading {
        return None;
    }
    if toast.action.is_some() && config.action_policy == ActionPolicy::RequireExplicit {
        return None;
    }
    match toast.duration {
        Some(ToastDuration::Never) => None,
        Some(ToastDuration::After(duration)) => Some(duration),
        None => Some(config.duration()),
    }
}

/// Lifecycle state of one mounted toast.
#[derive(Debug, Clone)]
pub struct Card {
    id: ToastId,
    phase: CardPhase,
    countdown: Option<Countdown>,
    timing: Timing,
    swipe: SwipeTracker,
    allowed: Vec<SwipeDirection>,
    dismissible: bool,
}

impl Card {
    /// Mounts a card for a toast that is not marked for deletion.
    #[must_use]
    pub fn mount(
        toast: &Toast,
        position: Position,
        paused: bool,
        config: &ToasterConfig,
        now: Instant,
    ) -> Self {
        let mut card = Self {
            id: toast.id.clone(),
            phase: CardPhase::Idle,
            countdown: lifetime(toast, config).map(Countdown::new),
            timing: Timing::of(toast),
            swipe: SwipeTracker::default(),
            allowed: SwipeDirection::allowed_for(position),
            dismissible: toast.dismissible,
        };
        card.sync(toast, position, paused, config, now);
        card
    }

    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    /// Dismissing or removed.
    #[must_use]
    pub fn is_leaving(&self) -> bool {
        matches!(
            self.phase,
            CardPhase::Dismissing { .. } | CardPhase::Removed
        )
    }

    /// Time left before auto-dismissal, if the card has a countdown.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.countdown.map(|countdown| countdown.remaining_at(now))
    }

    #[must_use]
    pub fn swipe_offset(&self) -> Vector {
        self.swipe.offset()
    }

    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.swipe.is_active()
    }

    /// Brings the card in line with the latest record and surface state.
    pub fn sync(
        &mut self,
        toast: &Toast,
        position: Position,
        paused: bool,
        config: &ToasterConfig,
        now: Instant,
    ) -> Option<CardEffect> {
        if self.is_leaving() {
            return None;
        }

        self.dismissible = toast.dismissible;
        self.allowed = SwipeDirection::allowed_for(position);

        if toast.marked_for_deletion {
            return self.dismiss(DismissReason::Explicit, now);
        }

        let timing = Timing::of(toast);
        if timing != self.timing {
            log::debug!("toast {} timing changed, re-arming", self.id);
            self.timing = timing;
            self.countdown = lifetime(toast, config).map(Countdown::new);
        }

        let should_pause = paused && !toast.important;
        match (self.phase, should_pause) {
            (CardPhase::Idle, true) => {
                if let Some(countdown) = self.countdown.as_mut() {
                    countdown.pause(now);
                }
                self.phase = CardPhase::Paused;
                Some(CardEffect::Paused)
            }
            (CardPhase::Paused, false) => {
                if let Some(countdown) = self.countdown.as_mut() {
                    countdown.arm(now);
                }
                self.phase = CardPhase::Idle;
                Some(CardEffect::Resumed)
            }
            (CardPhase::Idle, false) => {
                if let Some(countdown) = self.countdown.as_mut() {
                    countdown.arm(now);
                }
                None
            }
            _ => None,
        }
    }

    /// Advances timers to `now`.
    pub fn tick(&mut self, now: Instant, exit_duration: Duration) -> Option<CardEffect> {
        match self.phase {
            CardPhase::Idle => {
                let expired = self
                    .countdown
                    .is_some_and(|countdown| countdown.is_expired(now));
                if expired {
                    self.dismiss(DismissReason::AutoClose, now)
                } else {
                    None
                }
            }
            CardPhase::Dismissing { since, .. } => {
                if now.saturating_duration_since(since) >= exit_duration {
                    self.phase = CardPhase::Removed;
                    Some(CardEffect::Removed)
                } else {
                    None
                }
            }
            CardPhase::Paused | CardPhase::Removed => None,
        }
    }

    /// Starts the exit transition. Returns `None` if already leaving.
    pub fn dismiss(&mut self, reason: DismissReason, now: Instant) -> Option<CardEffect> {
        if self.is_leaving() {
            return None;
        }
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.cancel();
        }
        self.swipe.cancel();
        self.phase = CardPhase::Dismissing { since: now, reason };
        Some(CardEffect::Dismissed(reason))
    }

    /// Returns whether the press started a gesture.
    pub fn swipe_start(&mut self, position: Point, now: Instant) -> bool {
        if !self.dismissible || self.is_leaving() {
            return false;
        }
        self.swipe.start(position, now);
        true
    }

    pub fn swipe_move(&mut self, position: Point) -> Vector {
        self.swipe.moved(position, &self.allowed)
    }

    pub fn swipe_end(
        &mut self,
        position: Point,
        now: Instant,
        threshold: SwipeThreshold,
    ) -> Option<CardEffect> {
        match self.swipe.end(position, now, &self.allowed, threshold) {
            SwipeOutcome::SwipedOut => self.dismiss(DismissReason::Swipe, now),
            SwipeOutcome::SwipedBack | SwipeOutcome::NotSwiped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{ToastButton, ToastOptions};

    fn toast(options: ToastOptions) -> Toast {
        Toast::from_options(ToastId::Num(1), options)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn exit() -> Duration {
        ToasterConfig::default().exit_duration()
    }

    #[test]
    fn countdown_banks_time_across_pauses() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(ms(1000));
        countdown.arm(t0);
        countdown.pause(t0 + ms(300));
        assert_eq!(countdown.remaining_at(t0 + ms(5000)), ms(700));

        countdown.arm(t0 + ms(5000));
        assert!(!countdown.is_expired(t0 + ms(5699)));
        assert!(countdown.is_expired(t0 + ms(5700)));
    }

    #[test]
    fn lifetime_policy() {
        let config = ToasterConfig::default();
        assert_eq!(lifetime(&toast(ToastOptions::new()), &config), Some(ms(4000)));
        assert_eq!(
            lifetime(&toast(ToastOptions::new().duration(ToastDuration::Never)), &config),
            None
        );
        assert_eq!(
            lifetime(&toast(ToastOptions::new().kind(ToastKind::Loading)), &config),
            None
        );

        let with_action = toast(ToastOptions::new().action(ToastButton::new("Undo")));
        assert_eq!(lifetime(&with_action, &config), Some(ms(4000)));
        let strict = ToasterConfig {
            action_policy: ActionPolicy::RequireExplicit,
            ..ToasterConfig::default()
        };
        assert_eq!(lifetime(&with_action, &strict), None);
    }

    #[test]
    fn auto_closes_then_removes_after_exit() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let record = toast(ToastOptions::new().duration(ToastDuration::from_millis(2000)));
        let mut card = Card::mount(&record, Position::BottomRight, false, &config, t0);

        assert_eq!(card.tick(t0 + ms(1999), exit()), None);
        assert_eq!(
            card.tick(t0 + ms(2000), exit()),
            Some(CardEffect::Dismissed(DismissReason::AutoClose))
        );
        assert_eq!(card.tick(t0 + ms(2100), exit()), None);
        assert_eq!(card.tick(t0 + ms(2200), exit()), Some(CardEffect::Removed));
        assert_eq!(card.phase(), CardPhase::Removed);
    }

    #[test]
    fn pause_and_resume_keep_remaining_time() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let record = toast(ToastOptions::new().duration(ToastDuration::from_millis(1000)));
        let mut card = Card::mount(&record, Position::BottomRight, false, &config, t0);

        let paused = card.sync(&record, Position::BottomRight, true, &config, t0 + ms(400));
        assert_eq!(paused, Some(CardEffect::Paused));
        assert_eq!(card.tick(t0 + ms(10_000), exit()), None);

        let resumed = card.sync(&record, Position::BottomRight, false, &config, t0 + ms(10_000));
        assert_eq!(resumed, Some(CardEffect::Resumed));
        assert_eq!(card.remaining(t0 + ms(10_000)), Some(ms(600)));
        assert_eq!(card.tick(t0 + ms(10_599), exit()), None);
        assert!(matches!(
            card.tick(t0 + ms(10_600), exit()),
            Some(CardEffect::Dismissed(DismissReason::AutoClose))
        ));
    }

    #[test]
    fn important_toasts_never_pause() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let record = toast(ToastOptions::new().important(true));
        let mut card = Card::mount(&record, Position::BottomRight, true, &config, t0);

        assert_eq!(card.phase(), CardPhase::Idle);
        assert!(card.tick(t0 + ms(4000), exit()).is_some());
    }

    #[test]
    fn kind_change_rearms_with_full_duration() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let mut record = toast(ToastOptions::new().kind(ToastKind::Loading));
        let mut card = Card::mount(&record, Position::BottomRight, false, &config, t0);
        assert_eq!(card.tick(t0 + ms(60_000), exit()), None);

        record.merge(ToastOptions::new().kind(ToastKind::Success));
        card.sync(&record, Position::BottomRight, false, &config, t0 + ms(60_000));

        assert_eq!(card.remaining(t0 + ms(60_000)), Some(ms(4000)));
        assert!(card.tick(t0 + ms(64_000), exit()).is_some());
    }

    #[test]
    fn timing_change_while_paused_stays_paused() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let mut record = toast(ToastOptions::new().kind(ToastKind::Loading));
        let mut card = Card::mount(&record, Position::BottomRight, true, &config, t0);
        assert_eq!(card.phase(), CardPhase::Paused);

        record.merge(ToastOptions::new().kind(ToastKind::Success));
        let effect = card.sync(&record, Position::BottomRight, true, &config, t0 + ms(5000));

        assert_eq!(effect, None);
        assert_eq!(card.phase(), CardPhase::Paused);
        assert_eq!(card.remaining(t0 + ms(9000)), Some(ms(4000)));

        let resumed = card.sync(&record, Position::BottomRight, false, &config, t0 + ms(9000));
        assert_eq!(resumed, Some(CardEffect::Resumed));
        assert!(card.tick(t0 + ms(12_999), exit()).is_none());
        assert!(card.tick(t0 + ms(13_000), exit()).is_some());
    }

    #[test]
    fn unchanged_record_does_not_rearm() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let record = toast(ToastOptions::new());
        let mut card = Card::mount(&record, Position::BottomRight, false, &config, t0);

        card.sync(&record, Position::BottomRight, false, &config, t0 + ms(1000));

        assert_eq!(card.remaining(t0 + ms(1000)), Some(ms(3000)));
    }

    #[test]
    fn dismissal_happens_once() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let record = toast(ToastOptions::new());
        let mut card = Card::mount(&record, Position::BottomRight, false, &config, t0);

        assert!(card.dismiss(DismissReason::Explicit, t0).is_some());
        assert!(card.dismiss(DismissReason::Explicit, t0).is_none());
        // Timer firing afterwards does not auto-close.
        assert_eq!(card.tick(t0 + ms(100), exit()), None);
    }

    #[test]
    fn marked_record_starts_exit() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();
        let mut record = toast(ToastOptions::new());
        let mut card = Card::mount(&record, Position::BottomRight, false, &config, t0);

        record.marked_for_deletion = true;
        assert_eq!(
            card.sync(&record, Position::BottomRight, false, &config, t0),
            Some(CardEffect::Dismissed(DismissReason::Explicit))
        );
        assert_eq!(card.sync(&record, Position::BottomRight, false, &config, t0), None);
    }

    #[test]
    fn swipe_out_dismisses_dismissible_cards_only() {
        let config = ToasterConfig::default();
        let t0 = Instant::now();

        let record = toast(ToastOptions::new());
        let mut card = Card::mount(&record, Position::BottomRight, false, &config, t0);
        assert!(card.swipe_start(Point::new(0.0, 0.0), t0));
        card.swipe_move(Point::new(0.0, 30.0));
        assert_eq!(
            card.swipe_end(Point::new(0.0, 30.0), t0 + ms(1000), config.swipe_threshold),
            Some(CardEffect::Dismissed(DismissReason::Swipe))
        );

        let pinned = toast(ToastOptions::new().dismissible(false));
        let mut card = Card::mount(&pinned, Position::BottomRight, false, &config, t0);
        assert!(!card.swipe_start(Point::new(0.0, 0.0), t0));
        assert_eq!(
            card.swipe_end(Point::new(0.0, 300.0), t0 + ms(10), config.swipe_threshold),
            None
        );
    }
}
