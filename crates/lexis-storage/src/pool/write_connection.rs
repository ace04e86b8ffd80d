//! The one connection allowed to write, behind `tokio::sync::Mutex`.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use lexis_core::config::StorageConfig;
use lexis_core::errors::LexisResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Sole writer for a Lexis database.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, config: &StorageConfig) -> LexisResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_storage_err(format!("open {}: {e}", path.display())))?;
        Self::configured(conn, config)
    }

    /// Private in-memory database; used by tests and short-lived tools.
    pub fn open_in_memory(config: &StorageConfig) -> LexisResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| to_storage_err(format!("open in-memory: {e}")))?;
        Self::configured(conn, config)
    }

    fn configured(conn: Connection, config: &StorageConfig) -> LexisResult<Self> {
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` while holding the write lock. Every write in the crate goes
    /// through here, so read-modify-write sequences never overlap.
    ///
    /// Must not be called from inside an async task.
    pub fn with_conn_sync<F, T>(&self, f: F) -> LexisResult<T>
    where
        F: FnOnce(&Connection) -> LexisResult<T>,
    {
        let conn = self.conn.blocking_lock();
        f(&conn)
    }
}
