//! Storage layer
//!
//! Key/value storage backing the client session, the equivalent of the
//! browser's local storage. Two backends are provided:
//! - In-memory storage - ephemeral, used by tests and one-shot runs
//! - File storage - a JSON file on disk, survives restarts
//!
//! The backend is selected based on configuration.
//!
//! Access is synchronous: every call completes against local state before
//! returning, so a read issued after a write always observes it.

pub mod file;
pub mod memory;

use std::sync::Arc;

use crate::config::{StorageConfig, StorageDriver};

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage backend trait
///
/// Values are raw strings; callers serialize structured data themselves.
/// Missing keys are `Ok(None)`, never an error.
pub trait StorageBackend: Send + Sync {
    /// Get a value
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Set several values as one mutation.
    ///
    /// Backends that persist must write all entries or none.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove all values
    fn clear(&self) -> Result<(), StorageError>;
}

/// Create a storage backend based on configuration
///
/// - `StorageDriver::Memory` - Creates an in-memory store
/// - `StorageDriver::File` - Opens (or lazily creates) the session file at `config.path`
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn StorageBackend>, StorageError> {
    match config.driver {
        StorageDriver::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageDriver::File => Ok(Arc::new(FileStorage::open(&config.path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_memory_storage() {
        let config = StorageConfig {
            driver: StorageDriver::Memory,
            ..StorageConfig::default()
        };
        let storage = create_storage(&config).unwrap();

        storage.set("token", "abc").unwrap();
        assert_eq!(storage.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_create_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            driver: StorageDriver::File,
            path: dir.path().join("nested").join("session.json"),
        };
        let storage = create_storage(&config).unwrap();

        storage.set("token", "abc").unwrap();
        assert!(config.path.exists());

        let reopened = create_storage(&config).unwrap();
        assert_eq!(reopened.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_default_set_many_writes_every_entry() {
        let storage = MemoryStorage::new();
        storage.set_many(&[("a", "1"), ("b", "2")]).unwrap();

        assert_eq!(storage.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(storage.get("b").unwrap(), Some("2".to_string()));
    }
}
