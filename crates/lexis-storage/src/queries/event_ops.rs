//! Insert, fetch, list, and dismiss learning events.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use lexis_core::errors::LexisResult;
use lexis_core::models::{LearningEvent, LearningEventType};

use super::{fmt_ts, from_json, parse_ts, to_json};
use crate::to_storage_err;

const SELECT_COLUMNS: &str = "SELECT id, event_type, file_type_id, file_type, keyword,
            correction_count, source_corrections, created_at, dismissed FROM learning_events";

pub fn insert_event(conn: &Connection, event: &LearningEvent) -> LexisResult<()> {
    conn.execute(
        "INSERT INTO learning_events (
            id, event_type, file_type_id, file_type, keyword, correction_count,
            source_corrections, created_at, dismissed
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            event.id,
            event.event_type.as_str(),
            event.file_type_id,
            event.file_type,
            event.keyword,
            event.correction_count,
            to_json(&event.source_corrections)?,
            fmt_ts(&event.created_at),
            event.dismissed as i32,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_event(conn: &Connection, id: &str) -> LexisResult<Option<LearningEvent>> {
    let raw = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            raw_event,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawEvent::into_event).transpose()
}

/// Most-recent-first; insertion order breaks timestamp ties.
pub fn recent_events(
    conn: &Connection,
    limit: usize,
    include_dismissed: bool,
) -> LexisResult<Vec<LearningEvent>> {
    let filter = if include_dismissed {
        ""
    } else {
        "WHERE dismissed = 0"
    };
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_COLUMNS} {filter} ORDER BY created_at DESC, seq DESC LIMIT ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], raw_event)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut events = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        events.push(raw.into_event()?);
    }
    Ok(events)
}

/// Returns false if the event does not exist. Dismissing twice is harmless.
pub fn dismiss_event(conn: &Connection, id: &str) -> LexisResult<bool> {
    let changed = conn
        .execute(
            "UPDATE learning_events SET dismissed = 1 WHERE id = ?1",
            params![id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

pub fn dismiss_all(conn: &Connection) -> LexisResult<usize> {
    conn.execute("UPDATE learning_events SET dismissed = 1 WHERE dismissed = 0", [])
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_events(conn: &Connection) -> LexisResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM learning_events", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

pub fn count_events_since(conn: &Connection, since: DateTime<Utc>) -> LexisResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM learning_events WHERE created_at >= ?1",
            params![fmt_ts(&since)],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// Distinct correction ids across every event's provenance list.
pub fn count_contributing_corrections(conn: &Connection) -> LexisResult<usize> {
    let mut stmt = conn
        .prepare("SELECT source_corrections FROM learning_events")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut seen = HashSet::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        let ids: Vec<String> = from_json(&raw)?;
        seen.extend(ids);
    }
    Ok(seen.len())
}

struct RawEvent {
    id: String,
    event_type: String,
    file_type_id: String,
    file_type: String,
    keyword: String,
    correction_count: u32,
    source_corrections: String,
    created_at: String,
    dismissed: bool,
}

impl RawEvent {
    fn into_event(self) -> LexisResult<LearningEvent> {
        let event_type = LearningEventType::parse(&self.event_type).ok_or_else(|| {
            to_storage_err(format!("unknown learning event type {:?}", self.event_type))
        })?;
        Ok(LearningEvent {
            id: self.id,
            event_type,
            file_type_id: self.file_type_id,
            file_type: self.file_type,
            keyword: self.keyword,
            correction_count: self.correction_count,
            source_corrections: from_json(&self.source_corrections)?,
            created_at: parse_ts(&self.created_at)?,
            dismissed: self.dismissed,
        })
    }
}

fn raw_event(row: &Row<'_>) -> rusqlite::Result<RawEvent> {
    Ok(RawEvent {
        id: row.get(0)?,
        event_type: row.get(1)?,
        file_type_id: row.get(2)?,
        file_type: row.get(3)?,
        keyword: row.get(4)?,
        correction_count: row.get(5)?,
        source_corrections: row.get(6)?,
        created_at: row.get(7)?,
        dismissed: row.get::<_, i32>(8)? != 0,
    })
}
