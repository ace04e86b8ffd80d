//! LearningEngine: turns correction history into learned keywords.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use lexis_core::config::LearningConfig;
use lexis_core::errors::{LexisError, LexisResult};
use lexis_core::keyword;
use lexis_core::models::{
    BatchLearnResult, CommittedKeyword, KeywordSource, LearnOutcome, LearnResult,
    LearnableCandidate, LearnedKeyword, LearningCommit, NoSignalReason,
};
use lexis_core::traits::*;
use lexis_observability::events;
use tracing::{debug, info};

use crate::event_log::LearningEventLog;
use crate::frequency::analyze_group;
use crate::grouping::{group_corrections, CorrectionGroup};
use crate::threshold::ThresholdGate;
use crate::vocabulary::KnownVocabulary;

/// The keyword learning engine.
///
/// Pipeline per corrected type: grouping → frequency analysis → threshold
/// gate → known-vocabulary filter → one atomic commit.
pub struct LearningEngine {
    store: Arc<dyn ILearningStore>,
    gate: ThresholdGate,
    config: LearningConfig,
}

impl LearningEngine {
    /// Engine with default thresholds.
    pub fn new(store: Arc<dyn ILearningStore>) -> Self {
        let config = LearningConfig::default();
        Self {
            store,
            gate: ThresholdGate::from_config(&config),
            config,
        }
    }

    /// Engine with explicit thresholds. Rejects invalid configuration.
    pub fn with_config(store: Arc<dyn ILearningStore>, config: LearningConfig) -> LexisResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            gate: ThresholdGate::from_config(&config),
            config,
        })
    }

    pub fn gate(&self) -> ThresholdGate {
        self.gate
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Event log over the same store, bounded by `recent_events_limit`.
    pub fn event_log(&self) -> LearningEventLog {
        LearningEventLog::with_limit(Arc::clone(&self.store), self.config.recent_events_limit)
    }

    /// What learning would do for every correction pattern, without writing.
    ///
    /// `min_corrections` overrides the group size bar for this call only.
    /// Patterns with no keyword at the frequency bar are left out. Largest
    /// patterns come first.
    pub fn preview_learnable(
        &self,
        min_corrections: Option<usize>,
    ) -> LexisResult<Vec<LearnableCandidate>> {
        let gate = min_corrections.map_or(self.gate, |m| self.gate.with_min_corrections(m));
        let corrections = self.store.list_corrections()?;
        let mut vocabularies: HashMap<String, Option<KnownVocabulary>> = HashMap::new();
        let mut preview = Vec::new();

        for group in group_corrections(&corrections) {
            if !gate.is_eligible(group.len()) {
                continue;
            }
            let candidates = gate.candidates(&analyze_group(&group));
            if candidates.is_empty() {
                continue;
            }

            let vocabulary = match vocabularies.entry(group.key.corrected_type.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let definition = self.store.get_definition(entry.key())?;
                    entry.insert(definition.as_ref().map(KnownVocabulary::from_definition))
                }
            };
            let keywords = candidates.iter().map(|c| c.keyword.clone());
            let new_keywords = match vocabulary {
                Some(vocabulary) => vocabulary.filter(keywords),
                None => keywords.collect(),
            };

            preview.push(LearnableCandidate {
                predicted_type: group.key.predicted_type.clone(),
                corrected_type: group.key.corrected_type.clone(),
                correction_count: group.len(),
                candidates,
                new_keywords,
                definition_found: vocabulary.is_some(),
            });
        }

        preview.sort_by(|a, b| b.correction_count.cmp(&a.correction_count));
        Ok(preview)
    }

    /// Learn keywords for one corrected type.
    ///
    /// Several predicted types may have been corrected to `corrected_type`;
    /// each pattern is gated on its own and the candidates of eligible
    /// patterns are merged. Store failures propagate.
    pub fn learn_for_type(&self, corrected_type: &str) -> LexisResult<LearnResult> {
        let span = lexis_observability::learning_span!(corrected_type);
        let _guard = span.enter();

        let corrections = self.store.corrections_for_type(corrected_type)?;
        let mut groups = group_corrections(&corrections);
        groups.sort_by(|a, b| b.len().cmp(&a.len()));

        let largest_group = groups.first().map_or(0, CorrectionGroup::len);
        if !self.gate.is_eligible(largest_group) {
            return Ok(self.skip(
                corrected_type,
                LearnOutcome::NotEligible {
                    largest_group,
                    required: self.gate.min_corrections,
                },
            ));
        }

        let staged = self.stage_keywords(&groups);
        if staged.is_empty() {
            return Ok(self.skip(
                corrected_type,
                LearnOutcome::NoSignal {
                    reason: NoSignalReason::NoCommonKeywords,
                },
            ));
        }

        let Some(definition) = self.store.get_definition(corrected_type)? else {
            return Ok(self.skip(corrected_type, LearnOutcome::TargetNotFound));
        };

        let vocabulary = KnownVocabulary::from_definition(&definition);
        let fresh: Vec<CommittedKeyword> = staged
            .into_iter()
            .filter(|staged| !vocabulary.contains(&staged.keyword))
            .collect();
        if fresh.is_empty() {
            return Ok(self.skip(
                corrected_type,
                LearnOutcome::NoSignal {
                    reason: NoSignalReason::AlreadyLearned,
                },
            ));
        }

        let commit = LearningCommit {
            file_type_id: definition.id,
            file_type: definition.file_type,
            learned_at: Utc::now(),
            keywords: fresh,
        };
        let learned = self.store.commit_learning(&commit)?;
        if learned.is_empty() {
            return Ok(self.skip(
                corrected_type,
                LearnOutcome::NoSignal {
                    reason: NoSignalReason::AlreadyLearned,
                },
            ));
        }

        let keywords: Vec<String> = learned.iter().map(|e| e.keyword.clone()).collect();
        let event_ids = learned.into_iter().map(|e| e.id).collect();
        events::keywords_learned(corrected_type, &keywords);

        Ok(LearnResult::new(
            corrected_type,
            LearnOutcome::Learned {
                keywords,
                event_ids,
            },
        ))
    }

    /// Run [`Self::learn_for_type`] for every corrected type in history.
    ///
    /// A failure for one type is recorded in its result and the pass moves on.
    pub fn learn_all_pending(&self) -> LexisResult<BatchLearnResult> {
        let file_types = self.store.distinct_corrected_types()?;
        let span = lexis_observability::batch_learning_span!(file_types.len());
        let _guard = span.enter();

        let mut batch = BatchLearnResult::default();
        for file_type in file_types {
            let result = match self.learn_for_type(&file_type) {
                Ok(result) => result,
                Err(e) => {
                    let message = e.to_string();
                    events::learning_failed(&file_type, &message);
                    LearnResult::new(file_type, LearnOutcome::Failed { message })
                }
            };
            batch.processed += 1;
            batch.learned += result.learned_keywords().len();
            batch.per_type.push(result);
        }

        events::batch_completed(batch.processed, batch.learned);
        Ok(batch)
    }

    /// Add a keyword to a definition's learned ledger by hand.
    ///
    /// Returns false when the keyword is blank or already known. No learning
    /// event is recorded.
    pub fn add_manual_keyword(&self, file_type: &str, raw_keyword: &str) -> LexisResult<bool> {
        let definition = self.store.get_definition(file_type)?.ok_or_else(|| {
            LexisError::DefinitionNotFound {
                file_type: file_type.to_string(),
            }
        })?;

        let Some(keyword) = keyword::normalize(raw_keyword) else {
            return Ok(false);
        };
        if KnownVocabulary::from_definition(&definition).contains(&keyword) {
            debug!(file_type = %file_type, keyword = %keyword, "manual keyword already known");
            return Ok(false);
        }

        let added = self.store.append_learned_keyword(
            &definition.id,
            &LearnedKeyword {
                keyword: keyword.clone(),
                source: KeywordSource::Manual,
                added_at: Utc::now(),
                correction_count: 0,
            },
        )?;
        if added {
            info!(file_type = %file_type, keyword = %keyword, "manual keyword added");
        }
        Ok(added)
    }

    /// Candidates of every eligible group, deduplicated. Groups arrive
    /// largest first, so a keyword shared by several patterns carries the
    /// provenance of the largest one.
    fn stage_keywords(&self, groups: &[CorrectionGroup]) -> Vec<CommittedKeyword> {
        let mut seen = HashSet::new();
        let mut staged = Vec::new();

        for group in groups {
            if !self.gate.is_eligible(group.len()) {
                debug!(pattern = %group.key, size = group.len(), "pattern below correction bar");
                continue;
            }
            let candidates = self.gate.candidates(&analyze_group(group));
            if candidates.is_empty() {
                debug!(pattern = %group.key, size = group.len(), "no common keywords in pattern");
                continue;
            }

            let correction_count = u32::try_from(group.len()).unwrap_or(u32::MAX);
            let sources = group.source_ids();
            for candidate in candidates {
                if seen.insert(candidate.keyword.clone()) {
                    staged.push(CommittedKeyword {
                        keyword: candidate.keyword,
                        correction_count,
                        source_corrections: sources.clone(),
                    });
                }
            }
        }

        staged
    }

    fn skip(&self, file_type: &str, outcome: LearnOutcome) -> LearnResult {
        let result = LearnResult::new(file_type, outcome);
        events::learning_skipped(file_type, result.reason());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{correction, definition, InMemoryLearningStore};

    fn engine_with(
        corrections: &[lexis_core::models::Correction],
        definitions: &[lexis_core::models::TypeDefinition],
    ) -> (Arc<InMemoryLearningStore>, LearningEngine) {
        let store = Arc::new(InMemoryLearningStore::new());
        for c in corrections {
            store.record_correction(c).unwrap();
        }
        for d in definitions {
            store.upsert_definition(d).unwrap();
        }
        let engine = LearningEngine::new(store.clone());
        (store, engine)
    }

    #[test]
    fn not_eligible_reports_largest_group() {
        let (_, engine) = engine_with(
            &[
                correction("IMR", Some("Valuation"), &["rics"]),
                correction("IMR", Some("Valuation"), &["rics"]),
                correction("Deed", Some("Valuation"), &["rics"]),
            ],
            &[definition("Valuation", &[])],
        );
        let result = engine.learn_for_type("Valuation").unwrap();
        assert_eq!(
            result.outcome,
            LearnOutcome::NotEligible {
                largest_group: 2,
                required: 3
            }
        );
        assert_eq!(result.reason(), "Not enough corrections");
    }

    #[test]
    fn no_common_keywords_is_checked_before_definition_lookup() {
        let (_, engine) = engine_with(
            &[
                correction("IMR", Some("Valuation"), &["a"]),
                correction("IMR", Some("Valuation"), &["b"]),
                correction("IMR", Some("Valuation"), &["c"]),
            ],
            &[],
        );
        let result = engine.learn_for_type("Valuation").unwrap();
        assert_eq!(result.reason(), "No common keywords found");
    }

    #[test]
    fn missing_definition_is_target_not_found() {
        let (_, engine) = engine_with(
            &[
                correction("IMR", Some("Valuation"), &["rics"]),
                correction("IMR", Some("Valuation"), &["rics"]),
                correction("IMR", Some("Valuation"), &["rics"]),
            ],
            &[],
        );
        let result = engine.learn_for_type("Valuation").unwrap();
        assert_eq!(result.outcome, LearnOutcome::TargetNotFound);
    }

    #[test]
    fn shared_keyword_keeps_larger_pattern_provenance() {
        let big: Vec<_> = (0..4)
            .map(|_| correction("IMR", Some("Valuation"), &["rics"]))
            .collect();
        let small: Vec<_> = (0..3)
            .map(|_| correction("Deed", Some("Valuation"), &["rics", "deed"]))
            .collect();
        let all: Vec<_> = small.iter().chain(big.iter()).cloned().collect();
        let (store, engine) = engine_with(&all, &[definition("Valuation", &[])]);

        let result = engine.learn_for_type("Valuation").unwrap();
        assert!(result.success());

        let events = store.all_events();
        let rics = events.iter().find(|e| e.keyword == "rics").unwrap();
        assert_eq!(rics.correction_count, 4);
        assert_eq!(
            rics.source_corrections,
            big.iter().map(|c| c.id.clone()).collect::<Vec<_>>()
        );
        let deed = events.iter().find(|e| e.keyword == "deed").unwrap();
        assert_eq!(deed.correction_count, 3);
    }

    #[test]
    fn manual_keyword_is_normalized_and_deduplicated() {
        let (store, engine) = engine_with(&[], &[definition("Valuation", &["RICS"])]);

        assert!(engine.add_manual_keyword("Valuation", "  Market Value ").unwrap());
        assert!(!engine.add_manual_keyword("Valuation", "market value").unwrap());
        assert!(!engine.add_manual_keyword("Valuation", "rics").unwrap());
        assert!(!engine.add_manual_keyword("Valuation", "   ").unwrap());

        let def = store.get_definition("Valuation").unwrap().unwrap();
        assert_eq!(def.learned_keywords.len(), 1);
        assert_eq!(def.learned_keywords[0].keyword, "market value");
        assert_eq!(def.learned_keywords[0].source, KeywordSource::Manual);
        assert!(store.all_events().is_empty());
    }

    #[test]
    fn manual_keyword_for_unknown_type_errors() {
        let (_, engine) = engine_with(&[], &[]);
        let err = engine.add_manual_keyword("Nope", "x").unwrap_err();
        assert!(matches!(err, LexisError::DefinitionNotFound { .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let store = Arc::new(InMemoryLearningStore::new());
        let config = LearningConfig {
            min_frequency: 0.0,
            ..LearningConfig::default()
        };
        assert!(LearningEngine::with_config(store, config).is_err());
    }
}
