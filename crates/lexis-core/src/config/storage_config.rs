use serde::{Deserialize, Serialize};

use super::defaults;

/// Where the learning store lives and how SQLite is tuned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file opened by `StorageEngine::from_config`.
    pub db_path: String,
    pub wal_mode: bool,
    /// How long a writer waits on a locked database before failing.
    pub busy_timeout_ms: u32,
    /// Read-only connections for file-backed databases (1 to 8).
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            wal_mode: defaults::DEFAULT_WAL_MODE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
