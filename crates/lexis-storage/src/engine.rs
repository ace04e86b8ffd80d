//! StorageEngine: owns the ConnectionPool, runs migrations on open, and
//! implements every repository trait the learning engine consumes.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use lexis_core::config::StorageConfig;
use lexis_core::errors::LexisResult;
use lexis_core::models::{
    Correction, LearnedKeyword, LearningCommit, LearningEvent, TypeDefinition, UndoOutcome,
};
use lexis_core::traits::{
    ICorrectionStorage, ILearningEventStorage, ILearningLedger, ITypeDefinitionStorage,
};

use crate::migrations;
use crate::pool::{ConnectionPool, ReadPool};
use crate::queries::{correction_ops, definition_ops, event_ops, ledger_ops};

/// SQLite-backed store for corrections, definitions, and learning events.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk with default settings.
    pub fn open(path: &Path) -> LexisResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open the database at `config.db_path`.
    pub fn from_config(config: &StorageConfig) -> LexisResult<Self> {
        Self::open_with_config(Path::new(&config.db_path), config)
    }

    /// Open a file-backed engine with explicit storage settings.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> LexisResult<Self> {
        let mut pool = ConnectionPool::open(path, config)?;
        pool.writer.with_conn_sync(initialize)?;
        pool.attach_readers(config)?;
        tracing::info!(
            db_path = %path.display(),
            read_connections = pool.readers.as_ref().map_or(0, ReadPool::size),
            "storage opened"
        );
        Ok(Self { pool })
    }

    /// Open an in-memory storage engine (for testing).
    /// All reads go through the writer since there is no shared database to pool.
    pub fn open_in_memory() -> LexisResult<Self> {
        let pool = ConnectionPool::open_in_memory(&StorageConfig::default())?;
        pool.writer.with_conn_sync(initialize)?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> LexisResult<T>
    where
        F: FnOnce(&Connection) -> LexisResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    fn with_writer<F, T>(&self, f: F) -> LexisResult<T>
    where
        F: FnOnce(&Connection) -> LexisResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }
}

fn initialize(conn: &Connection) -> LexisResult<()> {
    let version = migrations::run_migrations(conn)?;
    tracing::debug!(schema_version = version, "storage initialized");
    Ok(())
}

impl ICorrectionStorage for StorageEngine {
    fn record_correction(&self, correction: &Correction) -> LexisResult<()> {
        self.with_writer(|conn| correction_ops::insert_correction(conn, correction))
    }

    fn list_corrections(&self) -> LexisResult<Vec<Correction>> {
        self.with_reader(correction_ops::list_corrections)
    }

    fn corrections_for_type(&self, corrected_type: &str) -> LexisResult<Vec<Correction>> {
        self.with_reader(|conn| correction_ops::corrections_for_type(conn, corrected_type))
    }

    fn distinct_corrected_types(&self) -> LexisResult<Vec<String>> {
        self.with_reader(correction_ops::distinct_corrected_types)
    }
}

impl ITypeDefinitionStorage for StorageEngine {
    fn upsert_definition(&self, definition: &TypeDefinition) -> LexisResult<()> {
        self.with_writer(|conn| definition_ops::upsert_definition(conn, definition))
    }

    fn get_definition(&self, file_type: &str) -> LexisResult<Option<TypeDefinition>> {
        self.with_reader(|conn| definition_ops::get_by_file_type(conn, file_type))
    }

    fn get_definition_by_id(&self, id: &str) -> LexisResult<Option<TypeDefinition>> {
        self.with_reader(|conn| definition_ops::get_by_id(conn, id))
    }

    fn append_learned_keyword(
        &self,
        definition_id: &str,
        keyword: &LearnedKeyword,
    ) -> LexisResult<bool> {
        self.with_writer(|conn| {
            ledger_ops::in_transaction(conn, "append_learned_keyword", |tx| {
                definition_ops::append_learned_keyword(tx, definition_id, keyword)
            })
        })
    }

    fn count_with_learned_keywords(&self) -> LexisResult<usize> {
        self.with_reader(definition_ops::count_with_learned_keywords)
    }
}

impl ILearningEventStorage for StorageEngine {
    fn get_event(&self, id: &str) -> LexisResult<Option<LearningEvent>> {
        self.with_reader(|conn| event_ops::get_event(conn, id))
    }

    fn recent_events(
        &self,
        limit: usize,
        include_dismissed: bool,
    ) -> LexisResult<Vec<LearningEvent>> {
        self.with_reader(|conn| event_ops::recent_events(conn, limit, include_dismissed))
    }

    fn dismiss_event(&self, id: &str) -> LexisResult<bool> {
        self.with_writer(|conn| event_ops::dismiss_event(conn, id))
    }

    fn dismiss_all(&self) -> LexisResult<usize> {
        self.with_writer(event_ops::dismiss_all)
    }

    fn count_events(&self) -> LexisResult<usize> {
        self.with_reader(event_ops::count_events)
    }

    fn count_events_since(&self, since: DateTime<Utc>) -> LexisResult<usize> {
        self.with_reader(|conn| event_ops::count_events_since(conn, since))
    }

    fn count_contributing_corrections(&self) -> LexisResult<usize> {
        self.with_reader(event_ops::count_contributing_corrections)
    }
}

impl ILearningLedger for StorageEngine {
    fn commit_learning(&self, commit: &LearningCommit) -> LexisResult<Vec<LearningEvent>> {
        self.with_writer(|conn| ledger_ops::commit_learning(conn, commit))
    }

    fn commit_undo(&self, event_id: &str) -> LexisResult<Option<UndoOutcome>> {
        self.with_writer(|conn| ledger_ops::commit_undo(conn, event_id))
    }
}
