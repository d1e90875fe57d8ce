// SPDX-License-Identifier: MPL-2.0
//! The single rendering owner of all toasts.
//!
//! The surface subscribes to the bus and forwards every event into an inbox
//! that is only drained on the surface's own thread, so merging by id never
//! races with producers. The host drives it with explicit timestamps:
//! [`Surface::sync`] applies pending events and reconciles cards, and
//! [`Surface::tick`] advances their timers.

use super::bus::{Bus, BusSubscription, ToastEvent};
use super::card::{Card, CardEffect, DismissReason};
use super::layout::CardLayout;
use super::notification::{Callback, Toast, ToastId};
use super::store::{Reconciled, Store, SurfaceState};
use crate::config::ToasterConfig;
use crate::diagnostics::{DiagnosticsHandle, LifecycleStage};
use crate::error::Error;
use crate::ui::theming::ThemeVariant;
use crossbeam_channel::{unbounded, Receiver};
use iced::{Point, Vector};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Opaque handle to whatever held focus before it entered the region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusTarget(pub String);

impl FocusTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

pub struct Surface {
    config: ToasterConfig,
    store: Store,
    cards: HashMap<ToastId, Card>,
    inbox: Receiver<ToastEvent>,
    seed: Option<ToastEvent>,
    _subscription: BusSubscription,
    diagnostics: Option<DiagnosticsHandle>,
    focus_within: bool,
    last_focused: Option<FocusTarget>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("toasts", &self.store.state().toasts.len())
            .field("cards", &self.cards.len())
            .field("pending", &self.inbox.len())
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Subscribes to `bus`, taking its seed event if nobody has yet.
    #[must_use]
    pub fn new(bus: &Bus, config: ToasterConfig, theme: ThemeVariant) -> Self {
        let (sender, inbox) = unbounded();
        let (subscription, seed) = bus.subscribe_seeded(move |event: &ToastEvent| {
            sender
                .send(event.clone())
                .map_err(|_| Error::Subscriber("surface inbox is closed".to_string()))
        });

        Self {
            config,
            store: Store::new(theme),
            cards: HashMap::new(),
            inbox,
            seed,
            _subscription: subscription,
            diagnostics: None,
            focus_within: false,
            last_focused: None,
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ToasterConfig {
        &self.config
    }

    /// Live state, including changes since the last commit.
    #[must_use]
    pub fn state(&self) -> &SurfaceState {
        self.store.state()
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<SurfaceState> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Arc<SurfaceState>> {
        self.store.subscribe()
    }

    #[must_use]
    pub fn card(&self, id: &ToastId) -> Option<&Card> {
        self.cards.get(id)
    }

    fn record(&self, id: &ToastId, stage: LifecycleStage) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_toast(id, stage);
        }
    }

    /// Applies every pending bus event, then reconciles cards and commits.
    ///
    /// Returns the number of events applied.
    pub fn sync(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        let pending = self.seed.take().into_iter().chain(self.inbox.try_iter());
        let events: Vec<ToastEvent> = pending.collect();

        for event in events {
            applied += 1;
            match self.store.apply(event) {
                Reconciled::Inserted(id) => self.record(&id, LifecycleStage::Created),
                Reconciled::Merged(id) => self.record(&id, LifecycleStage::Updated),
                Reconciled::MarkedForDeletion(id) => {
                    self.record(&id, LifecycleStage::MarkedForDeletion);
                }
                Reconciled::MarkedAll(ids) => {
                    for id in &ids {
                        self.record(id, LifecycleStage::MarkedForDeletion);
                    }
                }
                Reconciled::Ignored => {}
            }
        }

        self.reconcile(now);
        self.store.commit();
        applied
    }

    /// Mounts new cards, feeds current records into existing ones and drops
    /// toasts that were dismissed before they ever mounted.
    fn reconcile(&mut self, now: Instant) {
        let state = self.store.state();
        let paused = state.expanded || state.interacting;
        let toasts = state.toasts.clone();

        for toast in &toasts {
            let position = toast.effective_position(self.config.position);
            match self.cards.get_mut(&toast.id) {
                Some(card) => {
                    if let Some(effect) = card.sync(toast, position, paused, &self.config, now) {
                        self.apply_effect(&toast.id, effect);
                    }
                }
                None if toast.marked_for_deletion => {
                    log::debug!("toast {} dismissed before mount", toast.id);
                    self.store.remove(&toast.id);
                    self.record(&toast.id, LifecycleStage::Removed);
                }
                None => {
                    let card = Card::mount(toast, position, paused, &self.config, now);
                    self.cards.insert(toast.id.clone(), card);
                    self.record(&toast.id, LifecycleStage::Mounted);
                }
            }
        }

        let store = &self.store;
        self.cards.retain(|id, _| store.state().toast(id).is_some());
    }

    /// Advances every card's timers and exit transitions to `now`.
    pub fn tick(&mut self, now: Instant) {
        let exit = self.config.exit_duration();
        let effects: Vec<(ToastId, CardEffect)> = self
            .cards
            .iter_mut()
            .filter_map(|(id, card)| card.tick(now, exit).map(|effect| (id.clone(), effect)))
            .collect();

        for (id, effect) in effects {
            self.apply_effect(&id, effect);
        }
        self.store.commit();
    }

    fn apply_effect(&mut self, id: &ToastId, effect: CardEffect) {
        match effect {
            CardEffect::Paused => self.record(id, LifecycleStage::Paused),
            CardEffect::Resumed => self.record(id, LifecycleStage::Resumed),
            CardEffect::Dismissed(reason) => {
                self.store.apply(ToastEvent::Dismiss { id: id.clone() });
                let Some(toast) = self.store.state().toast(id).cloned() else {
                    return;
                };
                let (callback, stage) = match reason {
                    DismissReason::AutoClose => (&toast.on_auto_close, LifecycleStage::AutoClosed),
                    DismissReason::Explicit => (&toast.on_dismiss, LifecycleStage::Dismissed),
                    DismissReason::Swipe => (&toast.on_dismiss, LifecycleStage::SwipedOut),
                };
                log::debug!("toast {id} leaving ({reason:?})");
                self.record(id, stage);
                if let Some(callback) = callback {
                    self.invoke(callback, &toast);
                }
            }
            CardEffect::Removed => {
                self.cards.remove(id);
                self.store.remove(id);
                log::debug!("toast {id} removed");
                self.record(id, LifecycleStage::Removed);
            }
        }
    }

    /// Runs a host callback, keeping a panic inside it from unwinding into
    /// the surface.
    fn invoke(&self, callback: &Callback, toast: &Toast) {
        if panic::catch_unwind(AssertUnwindSafe(|| callback.call(toast))).is_err() {
            log::warn!("callback for toast {} panicked", toast.id);
            if let Some(diagnostics) = &self.diagnostics {
                diagnostics.log_error(format!("callback for toast {} panicked", toast.id));
            }
        }
    }

    fn refresh(&mut self, now: Instant) {
        self.reconcile(now);
        self.store.commit();
    }

    // Region interaction

    pub fn mouse_enter(&mut self, now: Instant) {
        self.store.set_expanded(true);
        self.refresh(now);
    }

    pub fn mouse_move(&mut self, now: Instant) {
        self.mouse_enter(now);
    }

    pub fn mouse_leave(&mut self, now: Instant) {
        if !self.store.state().interacting {
            self.store.set_expanded(false);
        }
        self.refresh(now);
    }

    /// Pointer pressed inside the region; only dismissible targets count.
    pub fn pointer_down(&mut self, target_dismissible: bool, now: Instant) {
        if target_dismissible {
            self.store.set_interacting(true);
            self.refresh(now);
        }
    }

    pub fn pointer_up(&mut self, now: Instant) {
        self.store.set_interacting(false);
        self.refresh(now);
    }

    /// Focus moved into the region from `previous`.
    pub fn focus_in(&mut self, previous: Option<FocusTarget>, target_dismissible: bool) {
        if !target_dismissible {
            return;
        }
        if !self.focus_within {
            self.focus_within = true;
            self.last_focused = previous;
        }
    }

    /// Focus left a card; returns the target to restore when it left the
    /// region entirely.
    pub fn focus_out(&mut self, to_inside: bool) -> Option<FocusTarget> {
        if !self.focus_within || to_inside {
            return None;
        }
        self.focus_within = false;
        self.last_focused.take()
    }

    #[must_use]
    pub fn has_focus_within(&self) -> bool {
        self.focus_within
    }

    /// Keys currently held, by code (`"alt"`, `"KeyT"`, `"Escape"`).
    ///
    /// The hotkey expands the stack and moves focus into the region, so a
    /// following `Escape` collapses it again.
    pub fn keys_pressed(&mut self, active: &[&str], now: Instant) {
        if self.config.hotkey.is_pressed(active) {
            self.store.set_expanded(true);
            self.focus_within = true;
        } else if self.focus_within && active.iter().any(|key| key.eq_ignore_ascii_case("escape"))
        {
            self.store.set_expanded(false);
        }
        self.refresh(now);
    }

    pub fn set_theme(&mut self, theme: ThemeVariant) {
        self.store.set_theme(theme);
        self.store.commit();
    }

    // Card boundary

    /// Records the measured height of a mounted card.
    pub fn report_height(&mut self, id: &ToastId, height: f32) {
        if self.store.set_height(id, height) {
            self.store.commit();
        }
    }

    #[must_use]
    pub fn layout(&self, id: &ToastId) -> Option<CardLayout> {
        let state = self.store.state();
        state
            .groups(self.config.position)
            .iter()
            .find_map(|group| CardLayout::compute(group, id, state.expanded, &self.config))
    }

    fn dismiss_card(&mut self, id: &ToastId, reason: DismissReason, now: Instant) {
        let effect = self
            .cards
            .get_mut(id)
            .and_then(|card| card.dismiss(reason, now));
        if let Some(effect) = effect {
            self.apply_effect(id, effect);
            self.store.commit();
        }
    }

    /// Close button.
    pub fn close(&mut self, id: &ToastId, now: Instant) {
        if self.store.state().toast(id).is_some_and(|toast| toast.dismissible) {
            self.dismiss_card(id, DismissReason::Explicit, now);
        }
    }

    pub fn click_action(&mut self, id: &ToastId, now: Instant) {
        let Some(toast) = self.store.state().toast(id).cloned() else {
            return;
        };
        if self.cards.get(id).is_some_and(Card::is_leaving) {
            return;
        }
        if let Some(callback) = toast.action.as_ref().and_then(|b| b.on_click.as_ref()) {
            self.invoke(callback, &toast);
        }
        self.dismiss_card(id, DismissReason::Explicit, now);
    }

    pub fn click_cancel(&mut self, id: &ToastId, now: Instant) {
        let Some(toast) = self.store.state().toast(id).cloned() else {
            return;
        };
        if !toast.dismissible || self.cards.get(id).is_some_and(Card::is_leaving) {
            return;
        }
        self.dismiss_card(id, DismissReason::Explicit, now);
        if let Some(callback) = toast.cancel.as_ref().and_then(|b| b.on_click.as_ref()) {
            self.invoke(callback, &toast);
        }
    }

    pub fn swipe_start(&mut self, id: &ToastId, position: Point, now: Instant) -> bool {
        self.cards
            .get_mut(id)
            .is_some_and(|card| card.swipe_start(position, now))
    }

    pub fn swipe_move(&mut self, id: &ToastId, position: Point) -> Vector {
        self.cards
            .get_mut(id)
            .map_or(Vector::ZERO, |card| card.swipe_move(position))
    }

    pub fn swipe_end(&mut self, id: &ToastId, position: Point, now: Instant) {
        let threshold = self.config.swipe_threshold;
        let effect = self
            .cards
            .get_mut(id)
            .and_then(|card| card.swipe_end(position, now, threshold));
        if let Some(effect) = effect {
            self.apply_effect(id, effect);
            self.store.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Toaster, ToastButton, ToastDuration, ToastOptions};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (Toaster, Surface) {
        let bus = Bus::new();
        let surface = Surface::new(&bus, ToasterConfig::default(), ThemeVariant::Light);
        (Toaster::new(bus), surface)
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Toast) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move |_: &Toast| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn seed_event_published_before_mount_is_shown() {
        let bus = Bus::new();
        let toaster = Toaster::new(bus.clone());
        toaster.success("early");

        let mut surface = Surface::new(&bus, ToasterConfig::default(), ThemeVariant::Light);
        surface.sync(Instant::now());

        assert_eq!(surface.state().toasts.len(), 1);
    }

    #[test]
    fn dismissed_before_mount_is_removed_without_callback() {
        let (toaster, mut surface) = setup();
        let (dismissed, on_dismiss) = counter();
        let id = toaster.create(
            crate::notifications::ToastKind::Info,
            ToastOptions::new().on_dismiss(on_dismiss),
        );
        toaster.dismiss(&id);

        surface.sync(Instant::now());

        assert!(surface.state().toasts.is_empty());
        assert_eq!(dismissed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let (toaster, mut surface) = setup();
        let t0 = Instant::now();
        let a = toaster.message("a");
        toaster.message("b");
        surface.sync(t0);

        surface.mouse_enter(t0 + ms(1000));
        assert!(surface.state().expanded);
        surface.tick(t0 + ms(30_000));
        assert_eq!(surface.state().toasts.len(), 2);

        surface.mouse_leave(t0 + ms(30_000));
        assert!(!surface.state().expanded);
        assert_eq!(
            surface.card(&a).and_then(|card| card.remaining(t0 + ms(30_000))),
            Some(ms(3000))
        );
    }

    #[test]
    fn leave_keeps_expanded_while_interacting() {
        let (toaster, mut surface) = setup();
        let t0 = Instant::now();
        toaster.message("a");
        toaster.message("b");
        surface.sync(t0);

        surface.mouse_enter(t0);
        surface.pointer_down(true, t0);
        surface.mouse_leave(t0);
        assert!(surface.state().expanded);

        surface.pointer_up(t0);
        surface.mouse_leave(t0);
        assert!(!surface.state().expanded);
    }

    #[test]
    fn non_dismissible_press_does_not_interact() {
        let (toaster, mut surface) = setup();
        toaster.message("a");
        surface.sync(Instant::now());

        surface.pointer_down(false, Instant::now());
        assert!(!surface.state().interacting);
    }

    #[test]
    fn focus_restores_previous_target_once() {
        let (_toaster, mut surface) = setup();

        surface.focus_in(Some(FocusTarget::new("search")), true);
        surface.focus_in(Some(FocusTarget::new("card-1")), true);
        assert_eq!(surface.focus_out(true), None);
        assert_eq!(surface.focus_out(false), Some(FocusTarget::new("search")));
        assert_eq!(surface.focus_out(false), None);
    }

    #[test]
    fn hotkey_expands_and_escape_collapses() {
        let (toaster, mut surface) = setup();
        let t0 = Instant::now();
        toaster.message("a");
        toaster.message("b");
        surface.sync(t0);

        // Escape only collapses with focus inside the region.
        surface.mouse_enter(t0);
        surface.keys_pressed(&["Escape"], t0);
        assert!(surface.state().expanded);
        surface.mouse_leave(t0);

        surface.keys_pressed(&["Alt", "KeyT"], t0);
        assert!(surface.state().expanded);
        assert!(surface.has_focus_within());

        surface.keys_pressed(&["Escape"], t0);
        assert!(!surface.state().expanded);
    }

    #[test]
    fn hotkey_focus_keeps_previous_target() {
        let (toaster, mut surface) = setup();
        let t0 = Instant::now();
        toaster.message("a");
        toaster.message("b");
        surface.sync(t0);

        surface.focus_in(Some(FocusTarget::new("search")), true);
        surface.focus_out(false);
        surface.keys_pressed(&["alt", "KeyT"], t0);

        assert!(surface.has_focus_within());
        assert_eq!(surface.focus_out(false), None);
    }

    #[test]
    fn close_calls_on_dismiss_once_and_removes_after_exit() {
        let (toaster, mut surface) = setup();
        let (dismissed, on_dismiss) = counter();
        let (auto_closed, on_auto_close) = counter();
        let t0 = Instant::now();
        let id = toaster.show(
            ToastOptions::new()
                .duration(ToastDuration::from_millis(300))
                .on_dismiss(on_dismiss)
                .on_auto_close(on_auto_close),
        );
        surface.sync(t0);
        surface.report_height(&id, 40.0);

        surface.close(&id, t0 + ms(100));
        surface.close(&id, t0 + ms(150));
        toaster.dismiss(&id);
        surface.sync(t0 + ms(200));
        surface.tick(t0 + ms(299));

        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
        assert_eq!(auto_closed.load(Ordering::SeqCst), 0);
        assert!(surface.state().toasts[0].marked_for_deletion);

        surface.tick(t0 + ms(300));
        assert!(surface.state().toasts.is_empty());
        assert!(surface.state().heights.is_empty());
    }

    #[test]
    fn action_click_runs_handler_then_dismisses() {
        let (toaster, mut surface) = setup();
        let (clicked, on_click) = counter();
        let t0 = Instant::now();
        let id = toaster.action("Deleted", ToastButton::new("Undo").on_click(on_click));
        surface.sync(t0);

        surface.click_action(&id, t0);
        surface.click_action(&id, t0);

        assert_eq!(clicked.load(Ordering::SeqCst), 1);
        assert!(surface.card(&id).is_some_and(Card::is_leaving));
    }

    #[test]
    fn cancel_click_dismisses_only_dismissible_toasts() {
        let (toaster, mut surface) = setup();
        let (cancelled, on_cancel) = counter();
        let (dismissed, on_dismiss) = counter();
        let t0 = Instant::now();
        let pinned = toaster.show(
            ToastOptions::new()
                .title("Pinned")
                .dismissible(false)
                .cancel(ToastButton::new("Cancel")),
        );
        let id = toaster.show(
            ToastOptions::new()
                .title("Upload")
                .cancel(ToastButton::new("Cancel").on_click(on_cancel))
                .on_dismiss(on_dismiss),
        );
        surface.sync(t0);

        surface.click_cancel(&pinned, t0);
        assert!(surface.card(&pinned).is_some_and(|card| !card.is_leaving()));

        surface.click_cancel(&id, t0);
        surface.click_cancel(&id, t0);
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
        assert!(surface.card(&id).is_some_and(Card::is_leaving));
    }

    #[test]
    fn swipe_past_threshold_dismisses() {
        let (toaster, mut surface) = setup();
        let (dismissed, on_dismiss) = counter();
        let t0 = Instant::now();
        let id = toaster.show(ToastOptions::new().on_dismiss(on_dismiss));
        surface.sync(t0);

        assert!(surface.swipe_start(&id, Point::new(10.0, 10.0), t0));
        surface.swipe_move(&id, Point::new(10.0, 40.0));
        surface.swipe_end(&id, Point::new(10.0, 40.0), t0 + ms(1000));

        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_callback_is_contained() {
        let (toaster, mut surface) = setup();
        let t0 = Instant::now();
        let id = toaster.show(ToastOptions::new().on_dismiss(|_| panic!("host bug")));
        surface.sync(t0);

        surface.close(&id, t0);
        surface.tick(t0 + ms(200));

        assert!(surface.state().toasts.is_empty());
    }

    #[test]
    fn layout_is_per_group() {
        let (toaster, mut surface) = setup();
        let t0 = Instant::now();
        let a = toaster.message("a");
        let b = toaster.show(ToastOptions::new().position(crate::notifications::Position::TopLeft));
        surface.sync(t0);

        let a_layout = surface.layout(&a).expect("a is laid out");
        let b_layout = surface.layout(&b).expect("b is laid out");
        assert_eq!(a_layout.index, 0);
        assert_eq!(b_layout.index, 0);
        assert_eq!(b_layout.lift, 1.0);
    }
}
