//! SQLite-backed implementation of `BackingStore`
//!
//! Objects are rows of a single table, providing persistence across program
//! runs. Each `write` replaces the whole row.

use super::{BackingStore, StoreError};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed object storage
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database at the given path
    ///
    /// Creates the database and table if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns error if database cannot be opened or table creation fails.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, rusqlite::Error> {
        Self::with_connection(Connection::open(db_path)?)
    }

    /// Private in-memory database, gone when the store is dropped
    ///
    /// # Errors
    ///
    /// Returns error if table creation fails.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_objects (
                key TEXT PRIMARY KEY,
                data BLOB NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn load(conn: &Connection, key: &str) -> Result<Option<Vec<u8>>, rusqlite::Error> {
        conn.query_row(
            "SELECT data FROM kv_objects WHERE key = ?",
            params![key],
            |row| row.get::<_, Vec<u8>>(0),
        )
        .optional()
    }
}

fn backend_error(key: &str, e: &rusqlite::Error) -> StoreError {
    StoreError::backend(key, e.to_string())
}

impl BackingStore for SqliteStore {
    fn has(&self, key: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM kv_objects WHERE key = ?)",
            params![key],
            |row| row.get::<_, bool>(0),
        )
        .map_err(|e| backend_error(key, &e))
    }

    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let conn = self.conn.lock();
        Self::load(&conn, key)
            .map_err(|e| backend_error(key, &e))?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, content: &[u8], overwrite: bool) -> Result<usize, StoreError> {
        let conn = self.conn.lock();
        let sql = if overwrite {
            "INSERT OR REPLACE INTO kv_objects (key, data) VALUES (?, ?)"
        } else {
            "INSERT OR IGNORE INTO kv_objects (key, data) VALUES (?, ?)"
        };
        let inserted = conn
            .execute(sql, params![key, content])
            .map_err(|e| backend_error(key, &e))?;
        if inserted == 0 {
            return Err(StoreError::AlreadyExists(key.to_string()));
        }
        Ok(content.len())
    }
}
