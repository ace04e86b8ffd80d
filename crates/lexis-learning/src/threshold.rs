//! The learning threshold gate.

use std::cmp::Ordering;

use lexis_core::config::LearningConfig;
use lexis_core::models::KeywordCandidate;

use crate::frequency::KeywordFrequencies;

/// Decides which groups are large enough and which keywords common enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdGate {
    pub min_corrections: usize,
    pub min_frequency: f64,
}

impl Default for ThresholdGate {
    fn default() -> Self {
        Self::from_config(&LearningConfig::default())
    }
}

impl ThresholdGate {
    pub fn new(min_corrections: usize, min_frequency: f64) -> Self {
        Self {
            min_corrections,
            min_frequency,
        }
    }

    pub fn from_config(config: &LearningConfig) -> Self {
        Self::new(config.min_corrections, config.min_frequency)
    }

    /// Same frequency bar, different group size bar.
    pub fn with_min_corrections(self, min_corrections: usize) -> Self {
        Self {
            min_corrections,
            ..self
        }
    }

    pub fn is_eligible(&self, group_size: usize) -> bool {
        group_size >= self.min_corrections
    }

    /// Keywords at or above `min_frequency`, most frequent first, ties by keyword.
    ///
    /// Callers gate the group with [`Self::is_eligible`] first; this only
    /// looks at frequencies.
    pub fn candidates(&self, frequencies: &KeywordFrequencies) -> Vec<KeywordCandidate> {
        let mut candidates: Vec<KeywordCandidate> = frequencies
            .iter()
            .filter(|(_, stat)| stat.frequency >= self.min_frequency)
            .map(|(keyword, stat)| KeywordCandidate {
                keyword: keyword.to_string(),
                occurrences: stat.occurrences,
                frequency: stat.frequency,
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.frequency
                .partial_cmp(&a.frequency)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        candidates
    }
}
