use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::EVENT_KEYWORD_LEARNED;

/// Kinds of learning events. Only keyword learning is recorded today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LearningEventType {
    KeywordLearned,
}

impl LearningEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeywordLearned => EVENT_KEYWORD_LEARNED,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            EVENT_KEYWORD_LEARNED => Some(Self::KeywordLearned),
            _ => None,
        }
    }
}

/// Append-only audit record of one learned keyword.
///
/// Created once with `dismissed = false`; dismiss and undo both flip
/// `dismissed` to true. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearningEvent {
    pub id: String,
    pub event_type: LearningEventType,
    pub file_type_id: String,
    /// Denormalized for display.
    pub file_type: String,
    pub keyword: String,
    pub correction_count: u32,
    /// Ids of the corrections that justified the keyword, in creation order.
    pub source_corrections: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub dismissed: bool,
}
