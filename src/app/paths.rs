// SPDX-License-Identifier: MPL-2.0
//! Application data directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to [`get_app_data_dir_with_override`] (for tests)
//! 2. **Environment variable** `ICED_TOASTS_DATA_DIR`
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "IcedToasts";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "ICED_TOASTS_DATA_DIR";

/// Returns the application data directory path.
///
/// - Linux: `~/.local/share/IcedToasts/`
/// - macOS: `~/Library/Application Support/IcedToasts/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\IcedToasts\`
///
/// Returns `None` if the data directory cannot be determined.
#[must_use]
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
#[must_use]
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }

    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_override_wins() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let override_path = temp_dir.path().to_path_buf();

        assert_eq!(
            get_app_data_dir_with_override(Some(override_path.clone())),
            Some(override_path)
        );
    }

    #[test]
    fn default_path_ends_with_app_name() {
        // Only meaningful when the environment does not override it.
        if std::env::var(ENV_DATA_DIR).is_ok() {
            return;
        }
        if let Some(path) = get_app_data_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }
}
