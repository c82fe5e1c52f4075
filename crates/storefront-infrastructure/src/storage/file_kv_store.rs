//! JSON-file backed key-value store.
//!
//! The whole store is one flat JSON object of string values, cached in
//! memory and written through on every mutation via tmp file + rename.
//!
//! Mutations update the in-memory map before flushing. If the flush fails,
//! the error is returned but the new value stays visible to `get` for the
//! rest of the process; disk catches up on the next successful write.

use crate::paths::{PathError, StorefrontPaths};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use storefront_core::storage::{KeyValueStore, StorageError};

pub struct FileKeyValueStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// logged and also treated as empty; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "[FileKeyValueStore] Ignoring unreadable store {:?}: {}",
                    path,
                    e
                );
                BTreeMap::new()
            }
        };

        tracing::debug!(
            "[FileKeyValueStore] Opened {:?} with {} key(s)",
            path,
            entries.len()
        );

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Opens the store at the default location (`<config dir>/storefront/storage.json`).
    pub fn open_default() -> Result<Self, PathError> {
        Ok(Self::open(StorefrontPaths::storage_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path).map_err(|e| StorageError::Io(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io = |e: std::io::Error| StorageError::Io(e.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io)?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path).map_err(io)?;
        tmp_file.write_all(json.as_bytes()).map_err(io)?;
        tmp_file.sync_all().map_err(io)?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(io)
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "storage.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Stores `value` in memory, then flushes. A flush error leaves memory
    /// ahead of disk.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    /// Same ordering as `set`.
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries)
    }
}
