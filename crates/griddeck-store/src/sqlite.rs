// ABOUTME: SQLite-backed key-value storage for the card store.
// ABOUTME: Keeps one row per key with an RFC 3339 timestamp of the last write.

use std::path::Path;

use chrono::Utc;
use griddeck_core::{KeyValueStore, StorageError};
use rusqlite::{Connection, OptionalExtension, params};

/// A `kv` table in a SQLite database.
pub struct SqliteStorage {
    conn: Connection,
}

fn backend_err(err: rusqlite::Error) -> StorageError {
    StorageError::Backend(format!("sqlite error: {err}"))
}

impl SqliteStorage {
    /// Open or create the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(backend_err)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(backend_err)?;
        tracing::info!("opened sqlite storage at {}", path.display());
        Self::with_connection(conn)
    }

    /// A private database that disappears when the storage is dropped.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(backend_err)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .map_err(backend_err)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(backend_err)?;
        Ok(())
    }
}
