//! File-backed storage implementation
//!
//! All entries live in one JSON object file. Every mutation rewrites the
//! whole file atomically (tmp + rename), so a crash never leaves a
//! half-written session behind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use super::{StorageBackend, StorageError};

/// JSON file storage.
///
/// Entries are loaded once on `open` and kept in memory; writes go to disk
/// first and only then replace the in-memory copy, so a failed write leaves
/// the store unchanged.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A corrupted file is logged and
    /// treated as empty; it is overwritten on the next write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(data) if data.trim().is_empty() => HashMap::new(),
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => {
                    debug!(path = %path.display(), "loaded session storage from disk");
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupted storage file, ignoring");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` to a copy of the entries, persist it, then commit.
    fn update<F>(&self, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        mutate(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, data.as_bytes())?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), entries = entries.len(), "session storage written");
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.update(HashMap::clear)
    }
}
