//! Atomic learning and undo: definition patch + event writes in one transaction.

use rusqlite::Connection;

use lexis_core::errors::{LexisError, LexisResult, StorageError};
use lexis_core::models::{
    KeywordSource, LearnedKeyword, LearningCommit, LearningEvent, LearningEventType, UndoOutcome,
};

use super::{definition_ops, event_ops};
use crate::to_storage_err;

/// Apply a learning commit. Either the ledger patch and every event land, or nothing does.
pub fn commit_learning(conn: &Connection, commit: &LearningCommit) -> LexisResult<Vec<LearningEvent>> {
    in_transaction(conn, "commit_learning", |tx| commit_learning_inner(tx, commit))
}

/// Strip the event's keyword from its definition and dismiss the event, atomically.
pub fn commit_undo(conn: &Connection, event_id: &str) -> LexisResult<Option<UndoOutcome>> {
    in_transaction(conn, "commit_undo", |tx| commit_undo_inner(tx, event_id))
}

fn commit_learning_inner(
    conn: &Connection,
    commit: &LearningCommit,
) -> LexisResult<Vec<LearningEvent>> {
    let mut definition = definition_ops::get_by_id(conn, &commit.file_type_id)?.ok_or_else(|| {
        LexisError::DefinitionNotFound {
            file_type: commit.file_type.clone(),
        }
    })?;

    let mut events = Vec::with_capacity(commit.keywords.len());
    for staged in &commit.keywords {
        // Another pass may have committed this keyword since the caller read the definition.
        if definition.knows(&staged.keyword) {
            continue;
        }
        definition.learned_keywords.push(LearnedKeyword {
            keyword: staged.keyword.clone(),
            source: KeywordSource::Correction,
            added_at: commit.learned_at,
            correction_count: staged.correction_count,
        });

        let event = LearningEvent {
            id: uuid::Uuid::new_v4().to_string(),
            event_type: LearningEventType::KeywordLearned,
            file_type_id: definition.id.clone(),
            file_type: definition.file_type.clone(),
            keyword: staged.keyword.clone(),
            correction_count: staged.correction_count,
            source_corrections: staged.source_corrections.clone(),
            created_at: commit.learned_at,
            dismissed: false,
        };
        event_ops::insert_event(conn, &event)?;
        events.push(event);
    }
    if events.is_empty() {
        return Ok(events);
    }

    definition_ops::patch_learned(
        conn,
        &definition.id,
        &definition.learned_keywords,
        Some(commit.learned_at),
        commit.learned_at,
    )?;
    Ok(events)
}

fn commit_undo_inner(conn: &Connection, event_id: &str) -> LexisResult<Option<UndoOutcome>> {
    let Some(event) = event_ops::get_event(conn, event_id)? else {
        return Ok(None);
    };

    let mut keyword_removed = false;
    if let Some(mut definition) = definition_ops::get_by_id(conn, &event.file_type_id)? {
        if definition.remove_learned_at(&event.keyword, event.created_at) {
            keyword_removed = true;
            definition_ops::patch_learned(
                conn,
                &definition.id,
                &definition.learned_keywords,
                definition.last_learned_at,
                chrono::Utc::now(),
            )?;
        }
    }
    event_ops::dismiss_event(conn, event_id)?;

    Ok(Some(UndoOutcome {
        keyword: event.keyword,
        file_type: event.file_type,
        keyword_removed,
    }))
}

pub(crate) fn in_transaction<T>(
    conn: &Connection,
    operation: &str,
    body: impl FnOnce(&Connection) -> LexisResult<T>,
) -> LexisResult<T> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("{operation} begin: {e}")))?;

    match body(&tx) {
        Ok(value) => {
            tx.commit().map_err(|e| StorageError::TransactionFailed {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;
            Ok(value)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}
