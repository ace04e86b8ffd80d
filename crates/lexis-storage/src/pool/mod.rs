//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use lexis_core::config::StorageConfig;
use lexis_core::errors::LexisResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Owns the single write connection and, for file-backed databases, a read pool.
///
/// In-memory databases have no read pool: separate in-memory connections
/// would be separate databases.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer only. Readers are attached once migrations have created the schema.
    pub fn open(path: &Path, config: &StorageConfig) -> LexisResult<Self> {
        Ok(Self {
            writer: WriteConnection::open(path, config)?,
            readers: None,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory pool (for testing).
    pub fn open_in_memory(config: &StorageConfig) -> LexisResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory(config)?,
            readers: None,
            db_path: None,
        })
    }

    /// Open the read pool for a file-backed database.
    pub fn attach_readers(&mut self, config: &StorageConfig) -> LexisResult<()> {
        if let Some(path) = &self.db_path {
            self.readers = Some(ReadPool::open(path, config)?);
        }
        Ok(())
    }
}
