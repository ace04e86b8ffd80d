//! v002: learning_events.

use rusqlite::Connection;

use lexis_core::errors::LexisResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LexisResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS learning_events (
            seq                INTEGER PRIMARY KEY AUTOINCREMENT,
            id                 TEXT NOT NULL UNIQUE,
            event_type         TEXT NOT NULL,
            file_type_id       TEXT NOT NULL,
            file_type          TEXT NOT NULL,
            keyword            TEXT NOT NULL,
            correction_count   INTEGER NOT NULL,
            source_corrections TEXT NOT NULL DEFAULT '[]',
            created_at         TEXT NOT NULL,
            dismissed          INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (file_type_id) REFERENCES type_definitions(id)
        );

        CREATE INDEX IF NOT EXISTS idx_events_created ON learning_events(created_at);
        CREATE INDEX IF NOT EXISTS idx_events_definition ON learning_events(file_type_id);
        CREATE INDEX IF NOT EXISTS idx_events_dismissed ON learning_events(dismissed);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
