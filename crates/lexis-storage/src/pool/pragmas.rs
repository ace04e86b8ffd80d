//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use lexis_core::config::StorageConfig;
use lexis_core::errors::LexisResult;

use crate::to_storage_err;

/// Apply journal, sync, timeout and foreign-key pragmas to a write connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> LexisResult<()> {
    let journal_mode = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal_mode};
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Read connections only need the timeout and foreign keys.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> LexisResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> LexisResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
