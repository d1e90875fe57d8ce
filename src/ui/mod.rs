// SPDX-License-Identifier: MPL-2.0
//! User interface for the notification surface.
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme resolution and color schemes
//! - [`toast`] - Iced rendering of position groups and cards

pub mod design_tokens;
pub mod theming;
pub mod toast;
