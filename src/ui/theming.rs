// SPDX-License-Identifier: MPL-2.0
//! Light/dark theming for toast cards.
//!
//! The configured [`ThemeMode`] may be `system`; it is resolved once at
//! startup into a concrete [`ThemeVariant`], remembering the detected scheme
//! in the host's key-value store so later launches agree with the first one.

use crate::app::persisted_state::KeyValueStore;
use crate::notifications::ToastKind;
use crate::ui::design_tokens::palette;
use iced::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key under which the resolved theme is stored.
pub const THEME_KEY: &str = "theme";

/// Color palette for a theme variant.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub surface: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,

    // Semantic colors
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,
    pub neutral: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface: palette::WHITE,
            border: palette::GRAY_100,
            text_primary: palette::GRAY_950,
            text_secondary: palette::GRAY_700,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,
            neutral: palette::GRAY_700,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface: palette::GRAY_950,
            border: Color::from_rgb(0.16, 0.16, 0.16),
            text_primary: palette::GRAY_100,
            text_secondary: palette::GRAY_200,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::PRIMARY_400,
            neutral: palette::GRAY_200,
        }
    }

    #[must_use]
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Light => Self::light(),
            ThemeVariant::Dark => Self::dark(),
        }
    }

    /// Icon and border accent for a toast kind.
    #[must_use]
    pub fn accent(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Info => self.info,
            ToastKind::Warning => self.warning,
            ToastKind::Error => self.error,
            ToastKind::Normal | ToastKind::Action | ToastKind::Loading | ToastKind::Default => {
                self.neutral
            }
        }
    }
}

/// Tinted card background used when rich colors are enabled.
#[must_use]
pub fn rich_background(kind: ToastKind, variant: ThemeVariant) -> Option<Color> {
    let dark = variant == ThemeVariant::Dark;
    let color = match kind {
        ToastKind::Success if dark => palette::SUCCESS_BG_DARK,
        ToastKind::Success => palette::SUCCESS_BG_LIGHT,
        ToastKind::Info if dark => palette::INFO_BG_DARK,
        ToastKind::Info => palette::INFO_BG_LIGHT,
        ToastKind::Warning if dark => palette::WARNING_BG_DARK,
        ToastKind::Warning => palette::WARNING_BG_LIGHT,
        ToastKind::Error if dark => palette::ERROR_BG_DARK,
        ToastKind::Error => palette::ERROR_BG_LIGHT,
        _ => return None,
    };
    Some(color)
}

/// Theme as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// Theme after resolving `system`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeVariant::Light => "light",
            ThemeVariant::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeVariant::Light),
            "dark" => Some(ThemeVariant::Dark),
            _ => None,
        }
    }

    /// The opposite variant, used by the `invert` option.
    #[must_use]
    pub fn inverted(self) -> Self {
        match self {
            ThemeVariant::Light => ThemeVariant::Dark,
            ThemeVariant::Dark => ThemeVariant::Light,
        }
    }

    #[must_use]
    pub fn to_iced(self) -> iced::Theme {
        match self {
            ThemeVariant::Light => iced::Theme::Light,
            ThemeVariant::Dark => iced::Theme::Dark,
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambient color scheme of the desktop; light unless it reports dark.
#[must_use]
pub fn detect_system() -> ThemeVariant {
    if let Ok(dark_light::Mode::Dark) = dark_light::detect() {
        ThemeVariant::Dark
    } else {
        ThemeVariant::Light
    }
}

/// Resolves the configured mode against the store and the desktop.
pub fn resolve_theme(mode: ThemeMode, store: &mut dyn KeyValueStore) -> ThemeVariant {
    resolve_theme_with(mode, store, detect_system)
}

/// Same as [`resolve_theme`] with an explicit detector.
pub fn resolve_theme_with(
    mode: ThemeMode,
    store: &mut dyn KeyValueStore,
    detect: impl FnOnce() -> ThemeVariant,
) -> ThemeVariant {
    match mode {
        ThemeMode::Light => return ThemeVariant::Light,
        ThemeMode::Dark => return ThemeVariant::Dark,
        ThemeMode::System => {}
    }

    if let Some(stored) = store.get(THEME_KEY) {
        match ThemeVariant::parse(&stored) {
            Some(variant) => return variant,
            None => log::warn!("ignoring stored theme {stored:?}"),
        }
    }

    let detected = detect();
    if let Err(err) = store.set(THEME_KEY, detected.as_str()) {
        log::warn!("could not remember detected theme: {err}");
    }
    detected
}
