// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Toast` record held by the store, the
//! `ToastOptions` patch producers send to create or update one, and the
//! small value types both are made of.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Identity of a toast, either counter-assigned or chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToastId {
    Num(u64),
    Key(String),
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastId::Num(n) => write!(f, "{n}"),
            ToastId::Key(key) => f.write_str(key),
        }
    }
}

impl From<u64> for ToastId {
    fn from(value: u64) -> Self {
        ToastId::Num(value)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        ToastId::Key(value.to_string())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        ToastId::Key(value)
    }
}

/// Visual flavour of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Normal,
    Action,
    Success,
    Info,
    Warning,
    Error,
    /// Tracks a pending operation; never auto-dismisses.
    Loading,
    #[default]
    Default,
}

/// Screen anchor of a position group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    TopCenter,
    BottomCenter,
}

/// Vertical edge a position is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

/// Horizontal anchor of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalEdge {
    Left,
    Center,
    Right,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
        Position::TopCenter,
        Position::BottomCenter,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
            Position::TopCenter => "top-center",
            Position::BottomCenter => "bottom-center",
        }
    }

    #[must_use]
    pub fn vertical(self) -> VerticalEdge {
        match self {
            Position::TopLeft | Position::TopRight | Position::TopCenter => VerticalEdge::Top,
            Position::BottomLeft | Position::BottomRight | Position::BottomCenter => {
                VerticalEdge::Bottom
            }
        }
    }

    #[must_use]
    pub fn horizontal(self) -> HorizontalEdge {
        match self {
            Position::TopLeft | Position::BottomLeft => HorizontalEdge::Left,
            Position::TopCenter | Position::BottomCenter => HorizontalEdge::Center,
            Position::TopRight | Position::BottomRight => HorizontalEdge::Right,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| format!("unknown toast position: {s}"))
    }
}

/// How long a toast stays before it auto-dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastDuration {
    After(Duration),
    /// Stay until dismissed explicitly.
    Never,
}

impl ToastDuration {
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        ToastDuration::After(Duration::from_millis(ms))
    }
}

/// Shared callback receiving the toast it belongs to.
///
/// Two callbacks compare equal only when they are the same allocation, which
/// keeps re-publishing an unchanged record a true no-op.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(&Toast) + Send + Sync>);

impl Callback {
    pub fn new(f: impl Fn(&Toast) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, toast: &Toast) {
        (self.0)(toast);
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A labelled button rendered on the card.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastButton {
    pub label: String,
    pub on_click: Option<Callback>,
}

impl ToastButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
        }
    }

    #[must_use]
    pub fn on_click(mut self, f: impl Fn(&Toast) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Callback::new(f));
        self
    }
}

/// A notification held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `None` falls back to the surface's default lifetime.
    pub duration: Option<ToastDuration>,
    /// Keeps counting down while the stack is hovered or dragged.
    pub important: bool,
    pub dismissible: bool,
    /// `None` renders in the surface's default group.
    pub position: Option<Position>,
    /// Soft-delete flag; the record stays until its exit transition ends.
    pub marked_for_deletion: bool,
    pub action: Option<ToastButton>,
    pub cancel: Option<ToastButton>,
    pub on_dismiss: Option<Callback>,
    pub on_auto_close: Option<Callback>,
}

impl Toast {
    /// Builds a fresh record from creation options.
    #[must_use]
    pub fn from_options(id: ToastId, options: ToastOptions) -> Self {
        let mut toast = Self {
            id,
            kind: ToastKind::Default,
            title: None,
            description: None,
            duration: None,
            important: false,
            dismissible: true,
            position: None,
            marked_for_deletion: false,
            action: None,
            cancel: None,
            on_dismiss: None,
            on_auto_close: None,
        };
        toast.merge(options);
        toast
    }

    /// Shallow merge: fields present in `patch` win, absent ones are kept.
    ///
    /// The deletion mark and the identity are never touched by a patch.
    pub fn merge(&mut self, patch: ToastOptions) {
        let ToastOptions {
            id: _,
            kind,
            title,
            description,
            duration,
            important,
            dismissible,
            position,
            action,
            cancel,
            on_dismiss,
            on_auto_close,
        } = patch;

        if let Some(kind) = kind {
            self.kind = kind;
        }
        if title.is_some() {
            self.title = title;
        }
        if description.is_some() {
            self.description = description;
        }
        if duration.is_some() {
            self.duration = duration;
        }
        if let Some(important) = important {
            self.important = important;
        }
        if let Some(dismissible) = dismissible {
            self.dismissible = dismissible;
        }
        if position.is_some() {
            self.position = position;
        }
        if action.is_some() {
            self.action = action;
        }
        if cancel.is_some() {
            self.cancel = cancel;
        }
        if on_dismiss.is_some() {
            self.on_dismiss = on_dismiss;
        }
        if on_auto_close.is_some() {
            self.on_auto_close = on_auto_close;
        }
    }

    /// Position this toast renders at, given the surface default.
    #[must_use]
    pub fn effective_position(&self, default: Position) -> Position {
        self.position.unwrap_or(default)
    }
}

/// Caller-supplied fields for creating or updating a toast.
///
/// Every field is optional; on update only the fields that are set overwrite
/// the stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastOptions {
    pub id: Option<ToastId>,
    pub kind: Option<ToastKind>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<ToastDuration>,
    pub important: Option<bool>,
    pub dismissible: Option<bool>,
    pub position: Option<Position>,
    pub action: Option<ToastButton>,
    pub cancel: Option<ToastButton>,
    pub on_dismiss: Option<Callback>,
    pub on_auto_close: Option<Callback>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: ToastDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn important(mut self, important: bool) -> Self {
        self.important = Some(important);
        self
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastButton) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn cancel(mut self, cancel: ToastButton) -> Self {
        self.cancel = Some(cancel);
        self
    }

    #[must_use]
    pub fn on_dismiss(mut self, f: impl Fn(&Toast) + Send + Sync + 'static) -> Self {
        self.on_dismiss = Some(Callback::new(f));
        self
    }

    #[must_use]
    pub fn on_auto_close(mut self, f: impl Fn(&Toast) + Send + Sync + 'static) -> Self {
        self.on_auto_close = Some(Callback::new(f));
        self
    }
}
