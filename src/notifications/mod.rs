// SPDX-License-Identifier: MPL-2.0
//! Toast notification system.
//!
//! Producers hold a [`Toaster`] and publish through a shared [`Bus`]; a single
//! [`Surface`] subscribes, reconciles the events into its [`Store`], and runs
//! one [`Card`] lifecycle per mounted toast.
//!
//! # Example
//!
//! ```
//! use iced_toasts::config::ToasterConfig;
//! use iced_toasts::notifications::{Bus, Surface, Toaster};
//! use iced_toasts::ui::theming::ThemeVariant;
//! use std::time::Instant;
//!
//! let bus = Bus::new();
//! let mut surface = Surface::new(&bus, ToasterConfig::default(), ThemeVariant::Light);
//! let toaster = Toaster::new(bus);
//!
//! let id = toaster.success("Image saved");
//! surface.sync(Instant::now());
//! assert!(surface.state().toast(&id).is_some());
//! ```

mod bus;
mod card;
mod layout;
mod notification;
mod store;
mod surface;
mod swipe;
mod toaster;

pub use bus::{Bus, BusSubscription, ToastEvent};
pub use card::{lifetime, Card, CardEffect, CardPhase, Countdown, DismissReason};
pub use layout::CardLayout;
pub use notification::{
    Callback, HorizontalEdge, Position, Toast, ToastButton, ToastDuration, ToastId, ToastKind,
    ToastOptions, VerticalEdge,
};
pub use store::{HeightRecord, PositionGroup, Reconciled, Store, SurfaceState};
pub use surface::{FocusTarget, Surface};
pub use swipe::{SwipeDirection, SwipeOutcome, SwipeTracker};
pub use toaster::{PromiseContent, PromiseData, Toaster};
