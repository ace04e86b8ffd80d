use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{LexisError, LexisResult};

/// Thresholds and limits for keyword learning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// A correction group must hold at least this many corrections to be analyzed.
    pub min_corrections: usize,
    /// A keyword must appear in at least this share of a group (inclusive).
    pub min_frequency: f64,
    /// Default bound for recent learning-event listings.
    pub recent_events_limit: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_corrections: defaults::DEFAULT_MIN_CORRECTIONS,
            min_frequency: defaults::DEFAULT_MIN_FREQUENCY,
            recent_events_limit: defaults::DEFAULT_RECENT_EVENTS_LIMIT,
        }
    }
}

impl LearningConfig {
    /// Reject thresholds that would make every group eligible or no keyword a candidate.
    pub fn validate(&self) -> LexisResult<()> {
        if self.min_corrections == 0 {
            return Err(LexisError::ConfigError(
                "learning.min_corrections must be at least 1".into(),
            ));
        }
        if !(self.min_frequency > 0.0 && self.min_frequency <= 1.0) {
            return Err(LexisError::ConfigError(format!(
                "learning.min_frequency must be in (0, 1], got {}",
                self.min_frequency
            )));
        }
        if self.recent_events_limit == 0 {
            return Err(LexisError::ConfigError(
                "learning.recent_events_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
