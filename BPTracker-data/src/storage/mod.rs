//! Local key-value storage for the reading collection
//!
//! The repository reads and writes the whole collection as one serialized
//! value under a single key, so a backend only has to move opaque strings.
//! Backends:
//! - JSON file per key (default)
//! - SQLite key-value table (optional `sqlite` feature)
//! - In-memory map

use thiserror::Error;

pub mod config;
mod file;
mod memory;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use config::{open_store, StorageBackend, StorageConfig};
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Storage error
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Unsupported backend name in configuration
    #[error("Unsupported storage backend: {0}")]
    UnsupportedBackend(String),

    /// Migration error
    #[error("Storage migration error: {0}")]
    Migration(String),
}

/// Narrow read/write interface over a local key-value store
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` when nothing was written yet
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}
