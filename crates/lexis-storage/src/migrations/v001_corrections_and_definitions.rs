//! v001: corrections, type_definitions.

use rusqlite::Connection;

use lexis_core::errors::LexisResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LexisResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS corrections (
            seq               INTEGER PRIMARY KEY AUTOINCREMENT,
            id                TEXT NOT NULL UNIQUE,
            predicted_type    TEXT NOT NULL,
            corrected_type    TEXT,
            document_keywords TEXT NOT NULL DEFAULT '[]',
            created_at        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_corrections_corrected ON corrections(corrected_type);
        CREATE INDEX IF NOT EXISTS idx_corrections_created ON corrections(created_at);

        CREATE TABLE IF NOT EXISTS type_definitions (
            id               TEXT PRIMARY KEY,
            file_type        TEXT NOT NULL UNIQUE,
            keywords         TEXT NOT NULL DEFAULT '[]',
            learned_keywords TEXT NOT NULL DEFAULT '[]',
            last_learned_at  TEXT,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
