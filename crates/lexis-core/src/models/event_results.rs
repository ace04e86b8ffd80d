use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UndoResult {
    pub success: bool,
    pub keyword: String,
    pub file_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DismissResult {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DismissAllResult {
    pub dismissed_count: usize,
}

/// Aggregate view of the learning log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearningStats {
    /// Every keyword-learned event ever recorded, dismissed ones included.
    pub total_learned: usize,
    pub this_week: usize,
    pub this_month: usize,
    /// Definitions holding at least one learned keyword.
    pub types_with_learning: usize,
    /// Distinct corrections cited as provenance by any learning event.
    pub total_corrections_contributed: usize,
}
