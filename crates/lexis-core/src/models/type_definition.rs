use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::keyword;

/// Where a learned keyword came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum KeywordSource {
    Correction,
    Manual,
}

/// A machine-discovered keyword embedded in a [`TypeDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearnedKeyword {
    /// Stored normalized (trimmed, lowercase).
    pub keyword: String,
    pub source: KeywordSource,
    pub added_at: DateTime<Utc>,
    /// Size of the correction group that justified the keyword when it was learned.
    pub correction_count: u32,
}

/// Classification definition of one document type.
///
/// Owned by the definition catalog. The learning engine only appends to
/// `learned_keywords` and stamps `last_learned_at` / `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TypeDefinition {
    pub id: String,
    pub file_type: String,
    /// Human-curated vocabulary. Membership is case-insensitive.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub learned_keywords: Vec<LearnedKeyword>,
    pub last_learned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TypeDefinition {
    /// A fresh definition with the given curated keywords and nothing learned.
    pub fn new(file_type: impl Into<String>, keywords: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_type: file_type.into(),
            keywords,
            learned_keywords: Vec::new(),
            last_learned_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `keyword` is curated or already learned (case-insensitive).
    pub fn knows(&self, keyword: &str) -> bool {
        self.keywords
            .iter()
            .chain(self.learned_keywords.iter().map(|learned| &learned.keyword))
            .any(|known| keyword::same_keyword(known, keyword))
    }

    /// Strip the correction-learned entry for `keyword` recorded at `learned_at`.
    ///
    /// Entries added by a later pass, or by hand, are left alone. Timestamps
    /// are compared to the microsecond, the precision the stores keep.
    /// Returns true if anything was removed.
    pub fn remove_learned_at(&mut self, keyword: &str, learned_at: DateTime<Utc>) -> bool {
        let before = self.learned_keywords.len();
        self.learned_keywords.retain(|learned| {
            !(learned.source == KeywordSource::Correction
                && learned.added_at.timestamp_micros() == learned_at.timestamp_micros()
                && keyword::same_keyword(&learned.keyword, keyword))
        });
        self.learned_keywords.len() != before
    }
}
