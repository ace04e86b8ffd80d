use chrono::{DateTime, Utc};

/// One keyword staged for an atomic learning commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedKeyword {
    /// Already normalized.
    pub keyword: String,
    pub correction_count: u32,
    pub source_corrections: Vec<String>,
}

/// Everything a store must apply in a single transaction when keywords are learned:
/// append to the definition's ledger, stamp `last_learned_at` and `updated_at`,
/// and insert one learning event per keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningCommit {
    pub file_type_id: String,
    pub file_type: String,
    pub learned_at: DateTime<Utc>,
    pub keywords: Vec<CommittedKeyword>,
}

/// What an atomic undo did.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoOutcome {
    pub keyword: String,
    pub file_type: String,
    /// False when the keyword was already gone from the definition.
    pub keyword_removed: bool,
}
