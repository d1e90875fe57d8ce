// SPDX-License-Identifier: MPL-2.0
//! `iced_toasts` is a stacked, swipeable toast notification system for Iced
//! applications.
//!
//! Producers publish through a [`notifications::Bus`] using a
//! [`notifications::Toaster`]; a single [`notifications::Surface`] reconciles
//! the events, runs per-card timers and gestures, and feeds the renderer in
//! [`ui::toast`].

#![doc(html_root_url = "https://docs.rs/iced_toasts/0.1.0")]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;
pub mod ui;
