//! Structured log events for key learning operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log that keywords were committed for a file type.
pub fn keywords_learned(file_type: &str, keywords: &[String]) {
    tracing::info!(
        event = "keywords_learned",
        file_type = %file_type,
        count = keywords.len(),
        keywords = ?keywords,
        "keywords learned"
    );
}

/// Log that a learning pass ended without committing anything.
pub fn learning_skipped(file_type: &str, reason: &str) {
    tracing::debug!(
        event = "learning_skipped",
        file_type = %file_type,
        reason = %reason,
        "learning skipped"
    );
}

/// Log a store failure isolated by batch mode.
pub fn learning_failed(file_type: &str, error: &str) {
    tracing::warn!(
        event = "learning_failed",
        file_type = %file_type,
        error = %error,
        "learning failed, continuing with remaining types"
    );
}

/// Log the end of a batch pass.
pub fn batch_completed(processed: usize, learned: usize) {
    tracing::info!(
        event = "batch_learning_completed",
        processed = processed,
        learned = learned,
        "batch learning completed"
    );
}

/// Log an undo.
pub fn keyword_undone(event_id: &str, file_type: &str, keyword: &str, removed: bool) {
    tracing::info!(
        event = "keyword_undone",
        event_id = %event_id,
        file_type = %file_type,
        keyword = %keyword,
        removed = removed,
        "learned keyword undone"
    );
}

/// Log a dismissal of one or more events.
pub fn events_dismissed(count: usize) {
    tracing::info!(
        event = "learning_events_dismissed",
        count = count,
        "learning events dismissed"
    );
}
