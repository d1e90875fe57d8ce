// SPDX-License-Identifier: MPL-2.0
//! Host key-value state using CBOR format.
//!
//! The toaster only remembers one thing across sessions (the resolved theme),
//! but it does so through the [`KeyValueStore`] trait so an embedding
//! application can plug in whatever storage it already has.
//!
//! # Path Resolution
//!
//! 1. Use [`FileStore::open_in`] with an explicit directory
//! 2. Set `ICED_TOASTS_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// String-to-string storage owned by the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Write-through store backed by a CBOR file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store in the default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined.
    pub fn open() -> Result<Self> {
        Self::open_in(None)
    }

    /// Opens the store in `base_dir`, or the default data directory.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// logged and replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined.
    pub fn open_in(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = paths::get_app_data_dir_with_override(base_dir)
            .ok_or_else(|| Error::State("no data directory available".to_string()))?;
        path.push(STATE_FILE);

        let entries = match Self::read(&path) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("discarding state file {}: {err}", path.display());
                BTreeMap::new()
            }
        };

        Ok(Self { path, entries })
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let reader = BufReader::new(fs::File::open(path)?);
        Ok(ciborium::from_reader(reader)?)
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(fs::File::create(&self.path)?);
        ciborium::into_writer(&self.entries, writer)?;
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write()
    }
}
