//! Upsert, get, and patch type definitions.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use lexis_core::errors::{LexisError, LexisResult};
use lexis_core::models::{LearnedKeyword, TypeDefinition};

use super::{fmt_ts, from_json, parse_ts, to_json};
use crate::to_storage_err;

const SELECT_COLUMNS: &str = "SELECT id, file_type, keywords, learned_keywords, last_learned_at,
            created_at, updated_at FROM type_definitions";

/// Insert a definition, or replace every field of the existing row with the same id.
pub fn upsert_definition(conn: &Connection, definition: &TypeDefinition) -> LexisResult<()> {
    conn.execute(
        "INSERT INTO type_definitions (
            id, file_type, keywords, learned_keywords, last_learned_at, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(id) DO UPDATE SET
            file_type = excluded.file_type,
            keywords = excluded.keywords,
            learned_keywords = excluded.learned_keywords,
            last_learned_at = excluded.last_learned_at,
            updated_at = excluded.updated_at",
        params![
            definition.id,
            definition.file_type,
            to_json(&definition.keywords)?,
            to_json(&definition.learned_keywords)?,
            definition.last_learned_at.as_ref().map(fmt_ts),
            fmt_ts(&definition.created_at),
            fmt_ts(&definition.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_by_file_type(conn: &Connection, file_type: &str) -> LexisResult<Option<TypeDefinition>> {
    query_one(conn, &format!("{SELECT_COLUMNS} WHERE file_type = ?1"), file_type)
}

pub fn get_by_id(conn: &Connection, id: &str) -> LexisResult<Option<TypeDefinition>> {
    query_one(conn, &format!("{SELECT_COLUMNS} WHERE id = ?1"), id)
}

/// Overwrite the learned ledger and stamps of one definition.
pub fn patch_learned(
    conn: &Connection,
    id: &str,
    learned_keywords: &[LearnedKeyword],
    last_learned_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
) -> LexisResult<()> {
    let changed = conn
        .execute(
            "UPDATE type_definitions
             SET learned_keywords = ?2, last_learned_at = ?3, updated_at = ?4
             WHERE id = ?1",
            params![
                id,
                to_json(learned_keywords)?,
                last_learned_at.as_ref().map(fmt_ts),
                fmt_ts(&updated_at),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(LexisError::DefinitionNotFound {
            file_type: id.to_string(),
        });
    }
    Ok(())
}

/// Number of definitions whose learned ledger is non-empty.
pub fn count_with_learned_keywords(conn: &Connection) -> LexisResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM type_definitions WHERE json_array_length(learned_keywords) > 0",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

fn query_one(conn: &Connection, sql: &str, key: &str) -> LexisResult<Option<TypeDefinition>> {
    let raw = conn
        .query_row(sql, params![key], raw_definition)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawDefinition::into_definition).transpose()
}

struct RawDefinition {
    id: String,
    file_type: String,
    keywords: String,
    learned_keywords: String,
    last_learned_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RawDefinition {
    fn into_definition(self) -> LexisResult<TypeDefinition> {
        Ok(TypeDefinition {
            id: self.id,
            file_type: self.file_type,
            keywords: from_json(&self.keywords)?,
            learned_keywords: from_json(&self.learned_keywords)?,
            last_learned_at: self.last_learned_at.as_deref().map(parse_ts).transpose()?,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

fn raw_definition(row: &Row<'_>) -> rusqlite::Result<RawDefinition> {
    Ok(RawDefinition {
        id: row.get(0)?,
        file_type: row.get(1)?,
        keywords: row.get(2)?,
        learned_keywords: row.get(3)?,
        last_learned_at: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Append one keyword to a definition's learned ledger and stamp `updated_at`.
/// Returns false without writing when the keyword is already known.
pub fn append_learned_keyword(
    conn: &Connection,
    id: &str,
    keyword: &LearnedKeyword,
) -> LexisResult<bool> {
    let mut definition = get_by_id(conn, id)?.ok_or_else(|| LexisError::DefinitionNotFound {
        file_type: id.to_string(),
    })?;
    if definition.knows(&keyword.keyword) {
        return Ok(false);
    }
    definition.learned_keywords.push(keyword.clone());
    patch_learned(
        conn,
        id,
        &definition.learned_keywords,
        definition.last_learned_at,
        Utc::now(),
    )?;
    Ok(true)
}
