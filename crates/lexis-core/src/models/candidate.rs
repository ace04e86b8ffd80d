use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A normalized keyword and how often it appears in one correction group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KeywordCandidate {
    pub keyword: String,
    pub occurrences: u32,
    pub frequency: f64,
}

/// Read-only preview of what learning would do for one correction pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearnableCandidate {
    pub predicted_type: String,
    pub corrected_type: String,
    pub correction_count: usize,
    /// Keywords at or above the frequency threshold, most frequent first.
    pub candidates: Vec<KeywordCandidate>,
    /// Candidates not yet known to the target definition.
    pub new_keywords: Vec<String>,
    pub definition_found: bool,
}
