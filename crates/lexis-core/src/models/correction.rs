use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A user's override of an automated document-type prediction.
///
/// Immutable once recorded. `corrected_type` is absent when the user only
/// confirmed the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Correction {
    pub id: String,
    pub predicted_type: String,
    pub corrected_type: Option<String>,
    /// Keywords extracted from the document at correction time, unnormalized.
    #[serde(default)]
    pub document_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Correction {
    /// Build a correction stamped with a fresh id and the current time.
    pub fn new(
        predicted_type: impl Into<String>,
        corrected_type: Option<String>,
        document_keywords: Vec<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            predicted_type: predicted_type.into(),
            corrected_type,
            document_keywords,
            created_at: Utc::now(),
        }
    }

    /// True if this correction carries a learning signal: a corrected type that
    /// differs from the prediction and at least one keyword.
    pub fn is_learning_signal(&self) -> bool {
        match &self.corrected_type {
            Some(corrected) => {
                corrected != &self.predicted_type && !self.document_keywords.is_empty()
            }
            None => false,
        }
    }
}
