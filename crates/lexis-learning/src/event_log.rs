//! The learning event log: listing, stats, dismiss and undo.

use std::sync::Arc;

use chrono::{Duration, Utc};
use lexis_core::config::defaults::DEFAULT_RECENT_EVENTS_LIMIT;
use lexis_core::constants::{MAX_RECENT_EVENTS, STATS_MONTH_DAYS, STATS_WEEK_DAYS};
use lexis_core::errors::{LexisError, LexisResult};
use lexis_core::models::{DismissAllResult, DismissResult, LearningEvent, LearningStats, UndoResult};
use lexis_core::traits::*;
use lexis_observability::events;

/// Audit trail of learned keywords.
pub struct LearningEventLog {
    store: Arc<dyn ILearningStore>,
    default_limit: usize,
}

impl LearningEventLog {
    pub fn new(store: Arc<dyn ILearningStore>) -> Self {
        Self::with_limit(store, DEFAULT_RECENT_EVENTS_LIMIT)
    }

    pub fn with_limit(store: Arc<dyn ILearningStore>, default_limit: usize) -> Self {
        Self {
            store,
            default_limit,
        }
    }

    /// Hide an event from the default listing. The keyword stays learned.
    /// Dismissing twice is fine.
    pub fn dismiss(&self, event_id: &str) -> LexisResult<DismissResult> {
        if !self.store.dismiss_event(event_id)? {
            return Err(LexisError::EventNotFound {
                id: event_id.to_string(),
            });
        }
        events::events_dismissed(1);
        Ok(DismissResult { success: true })
    }

    /// Dismiss every event not yet dismissed.
    pub fn dismiss_all(&self) -> LexisResult<DismissAllResult> {
        let dismissed_count = self.store.dismiss_all()?;
        events::events_dismissed(dismissed_count);
        Ok(DismissAllResult { dismissed_count })
    }

    /// Remove the event's keyword from its definition and dismiss the event,
    /// in one transaction.
    ///
    /// Undoing an already undone event succeeds without changing anything.
    pub fn undo(&self, event_id: &str) -> LexisResult<UndoResult> {
        let span = lexis_observability::undo_span!(event_id);
        let _guard = span.enter();

        let outcome = self
            .store
            .commit_undo(event_id)?
            .ok_or_else(|| LexisError::EventNotFound {
                id: event_id.to_string(),
            })?;
        events::keyword_undone(
            event_id,
            &outcome.file_type,
            &outcome.keyword,
            outcome.keyword_removed,
        );

        Ok(UndoResult {
            success: true,
            keyword: outcome.keyword,
            file_type: outcome.file_type,
        })
    }

    /// Most recent events first. `None` uses the configured default limit;
    /// every limit is capped at [`MAX_RECENT_EVENTS`].
    pub fn recent_events(
        &self,
        limit: Option<usize>,
        include_dismissed: bool,
    ) -> LexisResult<Vec<LearningEvent>> {
        let limit = limit.unwrap_or(self.default_limit).min(MAX_RECENT_EVENTS);
        self.store.recent_events(limit, include_dismissed)
    }

    pub fn stats(&self) -> LexisResult<LearningStats> {
        let now = Utc::now();
        Ok(LearningStats {
            total_learned: self.store.count_events()?,
            this_week: self
                .store
                .count_events_since(now - Duration::days(STATS_WEEK_DAYS))?,
            this_month: self
                .store
                .count_events_since(now - Duration::days(STATS_MONTH_DAYS))?,
            types_with_learning: self.store.count_with_learned_keywords()?,
            total_corrections_contributed: self.store.count_contributing_corrections()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LearningEngine;
    use test_fixtures::{correction, definition, InMemoryLearningStore};

    fn learned_store() -> (Arc<InMemoryLearningStore>, LearningEventLog) {
        let store = Arc::new(InMemoryLearningStore::new());
        for _ in 0..3 {
            store
                .record_correction(&correction("IMR", Some("Valuation"), &["rics", "surveyor"]))
                .unwrap();
        }
        store.upsert_definition(&definition("Valuation", &[])).unwrap();
        let engine = LearningEngine::new(store.clone());
        assert!(engine.learn_for_type("Valuation").unwrap().success());
        let log = engine.event_log();
        (store, log)
    }

    #[test]
    fn unknown_ids_are_errors() {
        let (_, log) = learned_store();
        assert!(matches!(
            log.dismiss("missing"),
            Err(LexisError::EventNotFound { .. })
        ));
        assert!(matches!(
            log.undo("missing"),
            Err(LexisError::EventNotFound { .. })
        ));
    }

    #[test]
    fn dismiss_is_idempotent_and_keeps_keyword() {
        let (store, log) = learned_store();
        let id = store.all_events()[0].id.clone();
        assert!(log.dismiss(&id).unwrap().success);
        assert!(log.dismiss(&id).unwrap().success);

        assert_eq!(log.recent_events(None, false).unwrap().len(), 1);
        assert_eq!(log.recent_events(None, true).unwrap().len(), 2);
        let def = store.get_definition("Valuation").unwrap().unwrap();
        assert_eq!(def.learned_keywords.len(), 2);
    }

    #[test]
    fn dismiss_all_counts_only_flips() {
        let (store, log) = learned_store();
        log.dismiss(&store.all_events()[0].id).unwrap();
        assert_eq!(log.dismiss_all().unwrap().dismissed_count, 1);
        assert_eq!(log.dismiss_all().unwrap().dismissed_count, 0);
    }

    #[test]
    fn limit_is_respected() {
        let (_, log) = learned_store();
        assert_eq!(log.recent_events(Some(1), true).unwrap().len(), 1);
        assert!(log.recent_events(Some(0), true).unwrap().is_empty());
    }

    #[test]
    fn stats_after_one_pass() {
        let (_, log) = learned_store();
        let stats = log.stats().unwrap();
        assert_eq!(stats.total_learned, 2);
        assert_eq!(stats.this_week, 2);
        assert_eq!(stats.this_month, 2);
        assert_eq!(stats.types_with_learning, 1);
        assert_eq!(stats.total_corrections_contributed, 3);
    }
}
