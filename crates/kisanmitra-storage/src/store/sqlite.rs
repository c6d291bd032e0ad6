// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed key-value store.
//!
//! One connection, guarded by a mutex, is the single writer. The `kv` table is
//! created by the embedded migrations on open.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use kisanmitra_core::{HealthStatus, KeyValueStore, KisanError};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::migrations::run_migrations;

/// A [`KeyValueStore`] persisted in a SQLite file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: String,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` in WAL mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KisanError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(KisanError::storage)?;
            }
        }
        let conn = Connection::open(path).map_err(KisanError::storage)?;
        Self::init(conn, path.display().to_string())
    }

    /// Open a private in-memory database. Used by tests and tooling.
    pub fn open_in_memory() -> Result<Self, KisanError> {
        let conn = Connection::open_in_memory().map_err(KisanError::storage)?;
        Self::init(conn, ":memory:".to_string())
    }

    fn init(mut conn: Connection, path: String) -> Result<Self, KisanError> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(KisanError::storage)?;
        run_migrations(&mut conn)?;
        debug!(path = %path, "SQLite key-value store opened");
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Filesystem path of the database, or `:memory:`.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, KisanError> {
        self.conn
            .lock()
            .map_err(|e| KisanError::Internal(format!("failed to lock SQLite connection: {e}")))
    }

    /// Number of keys in the table.
    pub fn count(&self) -> Result<usize, KisanError> {
        let conn = self.lock()?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .map_err(KisanError::storage)?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// Flush the WAL into the main database file.
    pub fn checkpoint(&self) -> Result<(), KisanError> {
        let conn = self.lock()?;
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
            .map_err(KisanError::storage)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Run `PRAGMA integrity_check`, returning the first reported line.
    pub fn integrity_check(&self) -> Result<String, KisanError> {
        let conn = self.lock()?;
        conn.query_row("PRAGMA integrity_check", [], |row| row.get::<_, String>(0))
            .map_err(KisanError::storage)
    }
}

impl KeyValueStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn get(&self, key: &str) -> Result<Option<String>, KisanError> {
        let conn = self.lock()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(KisanError::storage)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KisanError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )
        .map_err(KisanError::storage)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KisanError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(KisanError::storage)?;
        Ok(())
    }

    fn health_check(&self) -> Result<HealthStatus, KisanError> {
        match self.conn.lock() {
            Ok(conn) => match conn.execute_batch("SELECT 1;") {
                Ok(()) => Ok(HealthStatus::Healthy),
                Err(e) => Ok(HealthStatus::Unhealthy(format!("query failed: {e}"))),
            },
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "connection lock poisoned: {e}"
            ))),
        }
    }
}
