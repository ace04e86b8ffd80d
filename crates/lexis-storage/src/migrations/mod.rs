//! Versioned schema migrations tracked in `PRAGMA user_version`.

pub mod v001_corrections_and_definitions;
pub mod v002_learning_events;

use rusqlite::Connection;
use tracing::info;

use lexis_core::errors::{LexisResult, StorageError};

type MigrationFn = fn(&Connection) -> LexisResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_corrections_and_definitions::migrate),
    (2, v002_learning_events::migrate),
];

/// Latest schema version.
pub const LATEST_VERSION: u32 = 2;

/// Read the schema version recorded in the database.
pub fn current_version(conn: &Connection) -> LexisResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| {
            StorageError::MigrationFailed {
                version: 0,
                reason: e.to_string(),
            }
            .into()
        })
}

/// Apply every migration newer than the recorded version, each in its own transaction.
pub fn run_migrations(conn: &Connection) -> LexisResult<u32> {
    let mut version = current_version(conn)?;

    for (target, migrate) in MIGRATIONS {
        if version >= *target {
            continue;
        }
        let failed = |reason: String| StorageError::MigrationFailed {
            version: *target,
            reason,
        };

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| failed(e.to_string()))?;
        migrate(&tx)?;
        tx.pragma_update(None, "user_version", target)
            .map_err(|e| failed(e.to_string()))?;
        tx.commit().map_err(|e| failed(e.to_string()))?;

        info!(version = *target, "applied schema migration");
        version = *target;
    }

    Ok(version)
}
