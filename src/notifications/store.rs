// SPDX-License-Identifier: MPL-2.0
//! Authoritative toast collection and the UI state shared by every card.
//!
//! The store applies bus events with three rules: a dismiss request marks the
//! matching record, a known id is merged in place, and a create for a new id is
//! prepended. Every commit broadcasts an immutable snapshot on a watch channel
//! so the rendering layer never observes a half-applied batch.

use super::bus::ToastEvent;
use super::notification::{Position, Toast, ToastId};
use crate::ui::theming::ThemeVariant;
use std::sync::Arc;
use tokio::sync::watch;

/// Measured height of one mounted card.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightRecord {
    pub toast_id: ToastId,
    pub height: f32,
}

/// Everything the rendering layer needs to draw the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    /// Newest first.
    pub toasts: Vec<Toast>,
    /// Same relative order as `toasts`.
    pub heights: Vec<HeightRecord>,
    pub expanded: bool,
    pub interacting: bool,
    pub theme: ThemeVariant,
}

impl SurfaceState {
    fn new(theme: ThemeVariant) -> Self {
        Self {
            toasts: Vec::new(),
            heights: Vec::new(),
            expanded: false,
            interacting: false,
            theme,
        }
    }

    #[must_use]
    pub fn toast(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| &toast.id == id)
    }

    #[must_use]
    pub fn index_of(&self, id: &ToastId) -> Option<usize> {
        self.toasts.iter().position(|toast| &toast.id == id)
    }

    #[must_use]
    pub fn height_of(&self, id: &ToastId) -> Option<f32> {
        self.heights
            .iter()
            .find(|record| &record.toast_id == id)
            .map(|record| record.height)
    }

    /// Positions currently in use: `default` first, then every distinct
    /// explicit position in toast order.
    #[must_use]
    pub fn possible_positions(&self, default: Position) -> Vec<Position> {
        let mut positions = vec![default];
        for position in self.toasts.iter().filter_map(|toast| toast.position) {
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
        positions
    }

    /// One group per position in use, default group first.
    #[must_use]
    pub fn groups(&self, default: Position) -> Vec<PositionGroup> {
        self.possible_positions(default)
            .into_iter()
            .enumerate()
            .map(|(index, position)| self.group(position, index == 0))
            .collect()
    }

    /// Toasts rendered at `position`. Unpositioned toasts only belong to the
    /// default group.
    fn group(&self, position: Position, is_default: bool) -> PositionGroup {
        let toasts: Vec<Toast> = self
            .toasts
            .iter()
            .filter(|toast| match toast.position {
                None => is_default,
                Some(explicit) => explicit == position,
            })
            .cloned()
            .collect();

        let heights = self
            .heights
            .iter()
            .filter(|record| toasts.iter().any(|toast| toast.id == record.toast_id))
            .cloned()
            .collect();

        PositionGroup {
            position,
            toasts,
            heights,
        }
    }

    /// Collapse rule: a stack of at most one toast is never expanded.
    fn enforce_collapse(&mut self) {
        if self.toasts.len() <= 1 {
            self.expanded = false;
        }
    }
}

/// Toasts and heights sharing one screen anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionGroup {
    pub position: Position,
    pub toasts: Vec<Toast>,
    pub heights: Vec<HeightRecord>,
}

impl PositionGroup {
    /// Index of the toast within this group's stack.
    #[must_use]
    pub fn index_of(&self, id: &ToastId) -> Option<usize> {
        self.toasts.iter().position(|toast| &toast.id == id)
    }
}

/// What applying one event did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    Inserted(ToastId),
    Merged(ToastId),
    MarkedForDeletion(ToastId),
    /// Every toast not already leaving, newest first.
    MarkedAll(Vec<ToastId>),
    /// Update or dismiss for an id the store does not hold.
    Ignored,
}

/// Owner of the surface state; lives on the surface's thread.
#[derive(Debug)]
pub struct Store {
    state: SurfaceState,
    snapshots: watch::Sender<Arc<SurfaceState>>,
}

impl Store {
    #[must_use]
    pub fn new(theme: ThemeVariant) -> Self {
        let state = SurfaceState::new(theme);
        let (snapshots, _) = watch::channel(Arc::new(state.clone()));
        Self { state, snapshots }
    }

    /// Live state, including mutations not yet committed.
    #[must_use]
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Last committed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SurfaceState> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Receiver notified on every commit that changed something.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<SurfaceState>> {
        self.snapshots.subscribe()
    }

    /// Applies one bus event.
    pub fn apply(&mut self, event: ToastEvent) -> Reconciled {
        let outcome = match event {
            ToastEvent::Dismiss { id } => match self.find_mut(&id) {
                Some(toast) => {
                    toast.marked_for_deletion = true;
                    Reconciled::MarkedForDeletion(id)
                }
                None => Reconciled::Ignored,
            },
            ToastEvent::DismissAll => Reconciled::MarkedAll(
                self.state
                    .toasts
                    .iter_mut()
                    .filter(|toast| !toast.marked_for_deletion)
                    .map(|toast| {
                        toast.marked_for_deletion = true;
                        toast.id.clone()
                    })
                    .collect(),
            ),
            ToastEvent::Update { id, options } => match self.find_mut(&id) {
                Some(toast) => {
                    toast.merge(options);
                    Reconciled::Merged(id)
                }
                None => {
                    log::debug!("ignoring update for unknown toast {id}");
                    Reconciled::Ignored
                }
            },
            ToastEvent::Create { id, options } => match self.find_mut(&id) {
                Some(toast) => {
                    toast.merge(options);
                    Reconciled::Merged(id)
                }
                None => {
                    self.state
                        .toasts
                        .insert(0, Toast::from_options(id.clone(), options));
                    Reconciled::Inserted(id)
                }
            },
        };
        self.state.enforce_collapse();
        log::trace!("reconciled: {outcome:?}");
        outcome
    }

    fn find_mut(&mut self, id: &ToastId) -> Option<&mut Toast> {
        self.state.toasts.iter_mut().find(|toast| &toast.id == id)
    }

    /// Physically deletes a toast and its height record.
    pub fn remove(&mut self, id: &ToastId) -> Option<Toast> {
        let index = self.state.index_of(id)?;
        let toast = self.state.toasts.remove(index);
        self.remove_height(id);
        self.state.enforce_collapse();
        Some(toast)
    }

    /// Records or updates the measured height of a card.
    ///
    /// New records are inserted so that `heights` follows the order of
    /// `toasts`; existing records are updated in place. Returns `false` for a
    /// toast the store does not hold.
    pub fn set_height(&mut self, id: &ToastId, height: f32) -> bool {
        let Some(toast_index) = self.state.index_of(id) else {
            return false;
        };

        if let Some(record) = self
            .state
            .heights
            .iter_mut()
            .find(|record| &record.toast_id == id)
        {
            record.height = height;
            return true;
        }

        let toasts = &self.state.toasts;
        let insert_at = self
            .state
            .heights
            .iter()
            .position(|record| {
                toasts
                    .iter()
                    .position(|toast| toast.id == record.toast_id)
                    .is_some_and(|index| index > toast_index)
            })
            .unwrap_or(self.state.heights.len());

        self.state.heights.insert(
            insert_at,
            HeightRecord {
                toast_id: id.clone(),
                height,
            },
        );
        true
    }

    pub fn remove_height(&mut self, id: &ToastId) {
        self.state.heights.retain(|record| &record.toast_id != id);
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.state.expanded = expanded;
        self.state.enforce_collapse();
    }

    pub fn set_interacting(&mut self, interacting: bool) {
        self.state.interacting = interacting;
    }

    pub fn set_theme(&mut self, theme: ThemeVariant) {
        self.state.theme = theme;
    }

    /// Broadcasts the live state if it differs from the last snapshot.
    ///
    /// Returns whether a new snapshot was published.
    pub fn commit(&mut self) -> bool {
        self.state.enforce_collapse();
        let state = &self.state;
        self.snapshots.send_if_modified(|current| {
            if **current == *state {
                false
            } else {
                *current = Arc::new(state.clone());
                true
            }
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
