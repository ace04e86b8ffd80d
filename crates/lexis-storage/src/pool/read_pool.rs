//! Read-only connections for file-backed databases. WAL lets them run
//! alongside the writer.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use lexis_core::config::StorageConfig;
use lexis_core::errors::LexisResult;

use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

const MAX_READ_CONNECTIONS: usize = 8;

/// `storage.read_pool_size` read-only connections, used in rotation.
pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open the readers. The schema must already exist at `path`.
    pub fn open(path: &Path, config: &StorageConfig) -> LexisResult<Self> {
        let count = config.read_pool_size.clamp(1, MAX_READ_CONNECTIONS);
        let connections = (0..count)
            .map(|_| {
                let conn = Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
                .map_err(|e| to_storage_err(format!("open reader: {e}")))?;
                apply_read_pragmas(&conn, config)?;
                Ok(Mutex::new(conn))
            })
            .collect::<LexisResult<Vec<_>>>()?;
        Ok(Self {
            connections,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next reader in rotation.
    pub fn with_conn<F, T>(&self, f: F) -> LexisResult<T>
    where
        F: FnOnce(&Connection) -> LexisResult<T>,
    {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let conn = self.connections[slot]
            .lock()
            .map_err(|e| to_storage_err(format!("reader {slot} lock poisoned: {e}")))?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}
