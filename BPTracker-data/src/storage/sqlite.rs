use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info, warn};

use super::migrations::run_migrations;
use super::{KeyValueStore, StorageError};

/// SQLite-backed storage using a single `kv_store` table
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and run migrations
    ///
    /// A file that SQLite cannot read as a database is moved to
    /// `<path>.corrupt` and replaced by an empty database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent)?;
            }
        }

        info!("Opening SQLite database at: {}", path.display());
        let conn = match connect(path) {
            Ok(conn) => conn,
            Err(e) if is_unreadable_database(&e) => {
                let aside = corrupt_path(path);
                warn!(
                    "SQLite database at {} is unreadable ({}), moving it to {} and starting empty",
                    path.display(),
                    e,
                    aside.display()
                );
                fs::rename(path, &aside)?;
                connect(path)?
            }
            Err(e) => return Err(e.into()),
        };
        run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        info!("Initializing in-memory SQLite database");
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self { conn })
    }
}

/// Open a connection and read the schema header, which fails on a non-database file
fn connect(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))?;
    Ok(conn)
}

fn is_unreadable_database(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(e.code, ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt)
    )
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!("Reading key {} from SQLite", key);

        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!("Writing key {} to SQLite", key);

        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}
