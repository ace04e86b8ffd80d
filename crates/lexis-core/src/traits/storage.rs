use chrono::{DateTime, Utc};

use crate::errors::LexisResult;
use crate::models::{
    Correction, LearnedKeyword, LearningCommit, LearningEvent, TypeDefinition, UndoOutcome,
};

/// Read access to the correction history, plus ingestion for the capture flow.
pub trait ICorrectionStorage: Send + Sync {
    fn record_correction(&self, correction: &Correction) -> LexisResult<()>;
    /// Every correction, in creation order.
    fn list_corrections(&self) -> LexisResult<Vec<Correction>>;
    /// Corrections whose corrected type equals `corrected_type`, in creation order.
    fn corrections_for_type(&self, corrected_type: &str) -> LexisResult<Vec<Correction>>;
    /// Every distinct corrected type seen, sorted.
    fn distinct_corrected_types(&self) -> LexisResult<Vec<String>>;
}

/// Type definitions: the engine reads them and patches the learned ledger.
pub trait ITypeDefinitionStorage: Send + Sync {
    fn upsert_definition(&self, definition: &TypeDefinition) -> LexisResult<()>;
    fn get_definition(&self, file_type: &str) -> LexisResult<Option<TypeDefinition>>;
    fn get_definition_by_id(&self, id: &str) -> LexisResult<Option<TypeDefinition>>;
    /// Append one keyword to the learned ledger and stamp `updated_at`.
    /// Returns false, writing nothing, if the definition already knows it.
    fn append_learned_keyword(
        &self,
        definition_id: &str,
        keyword: &LearnedKeyword,
    ) -> LexisResult<bool>;
    /// Definitions with at least one learned keyword.
    fn count_with_learned_keywords(&self) -> LexisResult<usize>;
}

/// The append-only learning event log.
pub trait ILearningEventStorage: Send + Sync {
    fn get_event(&self, id: &str) -> LexisResult<Option<LearningEvent>>;
    /// Most-recent-first, at most `limit` events.
    fn recent_events(&self, limit: usize, include_dismissed: bool)
        -> LexisResult<Vec<LearningEvent>>;
    /// Mark one event dismissed. Returns false if no such event exists.
    fn dismiss_event(&self, id: &str) -> LexisResult<bool>;
    /// Dismiss every undismissed event. Returns how many flipped.
    fn dismiss_all(&self) -> LexisResult<usize>;
    fn count_events(&self) -> LexisResult<usize>;
    fn count_events_since(&self, since: DateTime<Utc>) -> LexisResult<usize>;
    /// Distinct correction ids referenced by any event's provenance.
    fn count_contributing_corrections(&self) -> LexisResult<usize>;
}

/// Atomic multi-record writes.
///
/// Implementations must commit the definition patch and the event writes of
/// each call together, or neither. A failed call leaves the store untouched.
pub trait ILearningLedger: Send + Sync {
    /// Append the staged keywords to the definition, stamp `last_learned_at`
    /// and `updated_at` with `commit.learned_at`, and insert one event per
    /// keyword. Returns the inserted events in keyword order.
    ///
    /// Staged keywords the definition knows by the time the write lock is
    /// held are skipped without an event. If none remain, nothing is written
    /// and the result is empty.
    fn commit_learning(&self, commit: &LearningCommit) -> LexisResult<Vec<LearningEvent>>;

    /// Strip the ledger entry this event recorded from its owning definition
    /// and mark the event dismissed. Entries from a later pass or added by
    /// hand are kept. Returns `None` for an unknown event.
    fn commit_undo(&self, event_id: &str) -> LexisResult<Option<UndoOutcome>>;
}

/// Everything the learning engine needs from a backing store.
pub trait ILearningStore:
    ICorrectionStorage + ITypeDefinitionStorage + ILearningEventStorage + ILearningLedger
{
}

impl<T> ILearningStore for T where
    T: ICorrectionStorage + ITypeDefinitionStorage + ILearningEventStorage + ILearningLedger
{
}
