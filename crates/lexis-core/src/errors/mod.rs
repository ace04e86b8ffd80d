//! Error taxonomy for the keyword-learning engine.
//!
//! "Why nothing happened" outcomes (not enough corrections, no signal,
//! missing definition) are values in [`crate::models::LearnOutcome`], not
//! errors. Only infrastructure failures and direct lookups of unknown ids
//! surface here.

mod storage_error;

pub use storage_error::StorageError;

/// Top-level error type for every Lexis crate.
#[derive(Debug, thiserror::Error)]
pub enum LexisError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("file type definition not found: {file_type}")]
    DefinitionNotFound { file_type: String },

    #[error("learning event not found: {id}")]
    EventNotFound { id: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

/// Convenience alias used across the workspace.
pub type LexisResult<T> = Result<T, LexisError>;
