// SPDX-License-Identifier: MPL-2.0
//! This module handles the toaster's configuration, including loading and saving
//! it to a `toasts.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_toasts::config::{self, ToasterConfig};
//! use iced_toasts::notifications::Position;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.position = Position::TopCenter;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;
mod newtypes;

pub use defaults::*;
pub use newtypes::{SwipeThreshold, VisibleToasts};

use crate::error::Result;
use crate::notifications::Position;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "toasts.toml";
const APP_NAME: &str = "IcedToasts";

/// Text direction of the notification region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
    /// Follow the host document.
    Auto,
}

impl TextDirection {
    /// Resolves `Auto` against the direction reported by the host, falling
    /// back to left-to-right when the host has no opinion.
    #[must_use]
    pub fn resolve(self, host: Option<TextDirection>) -> TextDirection {
        match self {
            TextDirection::Auto => match host {
                Some(TextDirection::Rtl) => TextDirection::Rtl,
                _ => TextDirection::Ltr,
            },
            direction => direction,
        }
    }
}

/// Whether a toast carrying an action button still auto-dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionPolicy {
    /// Action toasts time out like any other toast.
    #[default]
    AutoDismiss,
    /// Action toasts stay until the user clicks or dismisses them.
    RequireExplicit,
}

/// Key combination that force-expands the stack.
///
/// Names are matched case-insensitively against the keys the host reports
/// as held, e.g. `["alt", "KeyT"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hotkey(Vec<String>);

impl Hotkey {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Returns true when every key of the combination is currently held.
    #[must_use]
    pub fn is_pressed(&self, active: &[&str]) -> bool {
        !self.0.is_empty()
            && self
                .0
                .iter()
                .all(|key| active.iter().any(|held| held.eq_ignore_ascii_case(key)))
    }

    /// Human readable label, e.g. `alt+T`.
    #[must_use]
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(|key| key.replace("Key", "").replace("Digit", ""))
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl Default for Hotkey {
    fn default() -> Self {
        Self::new(["alt", "KeyT"])
    }
}

/// Configuration surface exposed by the toaster at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToasterConfig {
    /// Default anchor for toasts that do not pick one.
    pub position: Position,
    pub visible_toasts: VisibleToasts,
    /// Render every group expanded from the start.
    pub expand: bool,
    /// Default auto-dismiss lifetime in milliseconds.
    pub duration_ms: u64,
    pub gap: f32,
    /// Distance between the stack and the viewport edge.
    pub offset: f32,
    pub toast_width: f32,
    pub hotkey: Hotkey,
    pub rich_colors: bool,
    pub close_button: bool,
    pub invert: bool,
    pub dir: TextDirection,
    pub theme: ThemeMode,
    pub exit_duration_ms: u64,
    pub swipe_threshold: SwipeThreshold,
    pub action_policy: ActionPolicy,
    pub container_label: String,
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            position: Position::default(),
            visible_toasts: VisibleToasts::default(),
            expand: false,
            duration_ms: DEFAULT_TOAST_LIFETIME_MS,
            gap: DEFAULT_GAP,
            offset: DEFAULT_VIEWPORT_OFFSET,
            toast_width: DEFAULT_TOAST_WIDTH,
            hotkey: Hotkey::default(),
            rich_colors: false,
            close_button: false,
            invert: false,
            dir: TextDirection::default(),
            theme: ThemeMode::Light,
            exit_duration_ms: DEFAULT_EXIT_DURATION_MS,
            swipe_threshold: SwipeThreshold::default(),
            action_policy: ActionPolicy::default(),
            container_label: DEFAULT_CONTAINER_LABEL.to_string(),
        }
    }
}

impl ToasterConfig {
    /// Default auto-dismiss lifetime.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Time a dismissed card keeps its slot before removal.
    #[must_use]
    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms)
    }

    /// Accessible label of the region, suffixed with the hotkey hint.
    #[must_use]
    pub fn region_label(&self) -> String {
        format!("{} {}", self.container_label, self.hotkey.label())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<ToasterConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ToasterConfig::default())
}

pub fn save(config: &ToasterConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<ToasterConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid toaster config at {}: {err}", path.display());
            Ok(ToasterConfig::default())
        }
    }
}

pub fn save_to_path(config: &ToasterConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
