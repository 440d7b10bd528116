use rusqlite::Connection;
use tracing::info;

use super::StorageError;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    info!("Running SQLite migrations");

    create_key_value_table(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the key-value table holding serialized collections
fn create_key_value_table(conn: &Connection) -> Result<(), StorageError> {
    info!("Creating kv_store table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| StorageError::Migration(format!("Failed to create kv_store table: {}", e)))?;

    Ok(())
}
