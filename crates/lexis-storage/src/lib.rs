//! # lexis-storage
//!
//! SQLite persistence for the keyword-learning engine: correction history,
//! type definitions with their learned-keyword ledger, and the learning event
//! log. Multi-record writes run inside a single transaction.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use lexis_core::errors::{LexisError, StorageError};

/// Wrap any SQLite-layer failure message as a storage error.
pub(crate) fn to_storage_err(message: String) -> LexisError {
    LexisError::StorageError(StorageError::SqliteError { message })
}
