//! Insert and list corrections.

use rusqlite::{params, Connection, Row};

use lexis_core::errors::LexisResult;
use lexis_core::models::Correction;

use super::{fmt_ts, from_json, parse_ts, to_json};
use crate::to_storage_err;

const SELECT_COLUMNS: &str =
    "SELECT id, predicted_type, corrected_type, document_keywords, created_at FROM corrections";

/// Insert a correction. Corrections are immutable; re-inserting an id is an error.
pub fn insert_correction(conn: &Connection, correction: &Correction) -> LexisResult<()> {
    conn.execute(
        "INSERT INTO corrections (id, predicted_type, corrected_type, document_keywords, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            correction.id,
            correction.predicted_type,
            correction.corrected_type,
            to_json(&correction.document_keywords)?,
            fmt_ts(&correction.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All corrections in creation order (insertion order breaks timestamp ties).
pub fn list_corrections(conn: &Connection) -> LexisResult<Vec<Correction>> {
    query_corrections(
        conn,
        &format!("{SELECT_COLUMNS} ORDER BY created_at, seq"),
        &[],
    )
}

/// Corrections for one corrected type, in creation order.
pub fn corrections_for_type(conn: &Connection, corrected_type: &str) -> LexisResult<Vec<Correction>> {
    query_corrections(
        conn,
        &format!("{SELECT_COLUMNS} WHERE corrected_type = ?1 ORDER BY created_at, seq"),
        &[&corrected_type],
    )
}

/// Distinct non-null corrected types, sorted.
pub fn distinct_corrected_types(conn: &Connection) -> LexisResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT corrected_type FROM corrections
             WHERE corrected_type IS NOT NULL ORDER BY corrected_type",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut types = Vec::new();
    for row in rows {
        types.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(types)
}

fn query_corrections(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> LexisResult<Vec<Correction>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(args, raw_correction)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut corrections = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        corrections.push(raw.into_correction()?);
    }
    Ok(corrections)
}

struct RawCorrection {
    id: String,
    predicted_type: String,
    corrected_type: Option<String>,
    document_keywords: String,
    created_at: String,
}

impl RawCorrection {
    fn into_correction(self) -> LexisResult<Correction> {
        Ok(Correction {
            id: self.id,
            predicted_type: self.predicted_type,
            corrected_type: self.corrected_type,
            document_keywords: from_json(&self.document_keywords)?,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

fn raw_correction(row: &Row<'_>) -> rusqlite::Result<RawCorrection> {
    Ok(RawCorrection {
        id: row.get(0)?,
        predicted_type: row.get(1)?,
        corrected_type: row.get(2)?,
        document_keywords: row.get(3)?,
        created_at: row.get(4)?,
    })
}
