//! Storage configuration
//!
//! Backend selection comes from environment variables with defaults:
//! - `STORAGE_BACKEND`: `file` (default), `sqlite` or `memory`
//! - `DATA_DIR`: directory for the file backend (default `./data`)
//! - `STORAGE_SQLITE_PATH`: SQLite file (default `<DATA_DIR>/bp_tracker.db`)

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use super::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Default directory for local data
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default SQLite file name inside the data directory
pub const DEFAULT_SQLITE_FILE: &str = "bp_tracker.db";

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per key
    File,
    /// SQLite key-value table
    #[cfg(feature = "sqlite")]
    Sqlite,
    /// Process memory only
    Memory,
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "json" => Ok(StorageBackend::File),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(StorageError::UnsupportedBackend(s.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageBackend::File => "file",
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which backend to open
    pub backend: StorageBackend,
    /// Directory for local data files
    pub data_dir: PathBuf,
    /// Explicit SQLite file, overriding `<data_dir>/bp_tracker.db`
    pub sqlite_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            sqlite_path: None,
        }
    }
}

impl StorageConfig {
    /// Create a storage configuration from environment variables
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORAGE_BACKEND") {
            Some(name) => name.parse()?,
            None => StorageBackend::File,
        };

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let sqlite_path = lookup("STORAGE_SQLITE_PATH").map(PathBuf::from);

        info!(
            "Storage configuration: backend={}, data_dir={}",
            backend,
            data_dir.display()
        );

        Ok(Self {
            backend,
            data_dir,
            sqlite_path,
        })
    }

    /// Resolved SQLite database path
    pub fn sqlite_file(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_SQLITE_FILE))
    }
}

/// Open the configured backend
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, StorageError> {
    info!("Opening {} storage", config.backend);

    let store: Box<dyn KeyValueStore> = match config.backend {
        StorageBackend::File => Box::new(FileStore::new(&config.data_dir)),
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => Box::new(super::SqliteStore::open(config.sqlite_file())?),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };

    Ok(store)
}
