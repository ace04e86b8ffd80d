//! In-memory stand-in for the SQLite store.
//!
//! All tables sit behind one mutex. Multi-record writes are applied to a
//! staged copy of the tables and swapped in only when every step succeeded,
//! which gives the same all-or-nothing contract as a database transaction.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use lexis_core::errors::{LexisError, LexisResult, StorageError};
use lexis_core::models::{
    Correction, KeywordSource, LearnedKeyword, LearningCommit, LearningEvent, LearningEventType,
    TypeDefinition, UndoOutcome,
};
use lexis_core::traits::{
    ICorrectionStorage, ILearningEventStorage, ILearningLedger, ITypeDefinitionStorage,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    corrections: Vec<Correction>,
    definitions: Vec<TypeDefinition>,
    events: Vec<LearningEvent>,
}

impl Tables {
    fn definition_mut(&mut self, id: &str) -> Option<&mut TypeDefinition> {
        self.definitions.iter_mut().find(|d| d.id == id)
    }
}

/// Store holding every table in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLearningStore {
    tables: Mutex<Tables>,
    failing_types: Mutex<HashSet<String>>,
}

impl InMemoryLearningStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `commit_learning` for `file_type` fail with a storage error,
    /// as a rejected transaction would.
    pub fn fail_commits_for(&self, file_type: &str) {
        if let Ok(mut failing) = self.failing_types.lock() {
            failing.insert(file_type.to_string());
        }
    }

    /// Every stored event, in insertion order.
    pub fn all_events(&self) -> Vec<LearningEvent> {
        self.lock().map(|t| t.events.clone()).unwrap_or_default()
    }

    fn lock(&self) -> LexisResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|e| LexisError::ConcurrencyError(format!("store lock poisoned: {e}")))
    }

    fn should_fail(&self, file_type: &str) -> bool {
        self.failing_types
            .lock()
            .map(|failing| failing.contains(file_type))
            .unwrap_or(false)
    }
}

impl ICorrectionStorage for InMemoryLearningStore {
    fn record_correction(&self, correction: &Correction) -> LexisResult<()> {
        let mut tables = self.lock()?;
        if tables.corrections.iter().any(|c| c.id == correction.id) {
            return Err(StorageError::SqliteError {
                message: format!("duplicate correction id {}", correction.id),
            }
            .into());
        }
        tables.corrections.push(correction.clone());
        // Stable: insertion order breaks timestamp ties.
        tables.corrections.sort_by_key(|c| c.created_at);
        Ok(())
    }

    fn list_corrections(&self) -> LexisResult<Vec<Correction>> {
        Ok(self.lock()?.corrections.clone())
    }

    fn corrections_for_type(&self, corrected_type: &str) -> LexisResult<Vec<Correction>> {
        Ok(self
            .lock()?
            .corrections
            .iter()
            .filter(|c| c.corrected_type.as_deref() == Some(corrected_type))
            .cloned()
            .collect())
    }

    fn distinct_corrected_types(&self) -> LexisResult<Vec<String>> {
        let mut types: Vec<String> = self
            .lock()?
            .corrections
            .iter()
            .filter_map(|c| c.corrected_type.clone())
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }
}

impl ITypeDefinitionStorage for InMemoryLearningStore {
    fn upsert_definition(&self, definition: &TypeDefinition) -> LexisResult<()> {
        let mut tables = self.lock()?;
        match tables.definition_mut(&definition.id) {
            Some(existing) => *existing = definition.clone(),
            None => tables.definitions.push(definition.clone()),
        }
        Ok(())
    }

    fn get_definition(&self, file_type: &str) -> LexisResult<Option<TypeDefinition>> {
        Ok(self
            .lock()?
            .definitions
            .iter()
            .find(|d| d.file_type == file_type)
            .cloned())
    }

    fn get_definition_by_id(&self, id: &str) -> LexisResult<Option<TypeDefinition>> {
        Ok(self.lock()?.definitions.iter().find(|d| d.id == id).cloned())
    }

    fn append_learned_keyword(
        &self,
        definition_id: &str,
        keyword: &LearnedKeyword,
    ) -> LexisResult<bool> {
        let mut tables = self.lock()?;
        let definition =
            tables
                .definition_mut(definition_id)
                .ok_or_else(|| LexisError::DefinitionNotFound {
                    file_type: definition_id.to_string(),
                })?;
        if definition.knows(&keyword.keyword) {
            return Ok(false);
        }
        definition.learned_keywords.push(keyword.clone());
        definition.updated_at = Utc::now();
        Ok(true)
    }

    fn count_with_learned_keywords(&self) -> LexisResult<usize> {
        Ok(self
            .lock()?
            .definitions
            .iter()
            .filter(|d| !d.learned_keywords.is_empty())
            .count())
    }
}

impl ILearningEventStorage for InMemoryLearningStore {
    fn get_event(&self, id: &str) -> LexisResult<Option<LearningEvent>> {
        Ok(self.lock()?.events.iter().find(|e| e.id == id).cloned())
    }

    fn recent_events(
        &self,
        limit: usize,
        include_dismissed: bool,
    ) -> LexisResult<Vec<LearningEvent>> {
        let tables = self.lock()?;
        let mut events: Vec<LearningEvent> = tables
            .events
            .iter()
            .rev()
            .filter(|e| include_dismissed || !e.dismissed)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit);
        Ok(events)
    }

    fn dismiss_event(&self, id: &str) -> LexisResult<bool> {
        let mut tables = self.lock()?;
        match tables.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.dismissed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn dismiss_all(&self) -> LexisResult<usize> {
        let mut tables = self.lock()?;
        let mut flipped = 0;
        for event in tables.events.iter_mut().filter(|e| !e.dismissed) {
            event.dismissed = true;
            flipped += 1;
        }
        Ok(flipped)
    }

    fn count_events(&self) -> LexisResult<usize> {
        Ok(self.lock()?.events.len())
    }

    fn count_events_since(&self, since: DateTime<Utc>) -> LexisResult<usize> {
        Ok(self
            .lock()?
            .events
            .iter()
            .filter(|e| e.created_at >= since)
            .count())
    }

    fn count_contributing_corrections(&self) -> LexisResult<usize> {
        let tables = self.lock()?;
        let distinct: HashSet<&str> = tables
            .events
            .iter()
            .flat_map(|e| e.source_corrections.iter().map(String::as_str))
            .collect();
        Ok(distinct.len())
    }
}

impl ILearningLedger for InMemoryLearningStore {
    fn commit_learning(&self, commit: &LearningCommit) -> LexisResult<Vec<LearningEvent>> {
        let mut tables = self.lock()?;
        let mut staged = tables.clone();

        let definition = staged.definition_mut(&commit.file_type_id).ok_or_else(|| {
            LexisError::DefinitionNotFound {
                file_type: commit.file_type.clone(),
            }
        })?;
        let mut fresh = Vec::with_capacity(commit.keywords.len());
        for keyword in &commit.keywords {
            if definition.knows(&keyword.keyword) {
                continue;
            }
            definition.learned_keywords.push(LearnedKeyword {
                keyword: keyword.keyword.clone(),
                source: KeywordSource::Correction,
                added_at: commit.learned_at,
                correction_count: keyword.correction_count,
            });
            fresh.push(keyword);
        }
        if fresh.is_empty() {
            return Ok(Vec::new());
        }
        definition.last_learned_at = Some(commit.learned_at);
        definition.updated_at = commit.learned_at;
        let (definition_id, file_type) = (definition.id.clone(), definition.file_type.clone());

        let events: Vec<LearningEvent> = fresh
            .into_iter()
            .map(|keyword| LearningEvent {
                id: uuid::Uuid::new_v4().to_string(),
                event_type: LearningEventType::KeywordLearned,
                file_type_id: definition_id.clone(),
                file_type: file_type.clone(),
                keyword: keyword.keyword.clone(),
                correction_count: keyword.correction_count,
                source_corrections: keyword.source_corrections.clone(),
                created_at: commit.learned_at,
                dismissed: false,
            })
            .collect();
        staged.events.extend(events.iter().cloned());

        if self.should_fail(&commit.file_type) {
            return Err(StorageError::TransactionFailed {
                operation: "commit_learning".into(),
                reason: format!("injected failure for {}", commit.file_type),
            }
            .into());
        }

        *tables = staged;
        Ok(events)
    }

    fn commit_undo(&self, event_id: &str) -> LexisResult<Option<UndoOutcome>> {
        let mut tables = self.lock()?;
        let Some(event) = tables.events.iter().find(|e| e.id == event_id).cloned() else {
            return Ok(None);
        };

        let mut keyword_removed = false;
        if let Some(definition) = tables.definition_mut(&event.file_type_id) {
            if definition.remove_learned_at(&event.keyword, event.created_at) {
                keyword_removed = true;
                definition.updated_at = Utc::now();
            }
        }
        if let Some(stored) = tables.events.iter_mut().find(|e| e.id == event_id) {
            stored.dismissed = true;
        }

        Ok(Some(UndoOutcome {
            keyword: event.keyword,
            file_type: event.file_type,
            keyword_removed,
        }))
    }
}
