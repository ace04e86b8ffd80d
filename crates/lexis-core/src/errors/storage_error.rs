/// Storage-layer errors for the backing record store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("transaction rolled back during {operation}: {reason}")]
    TransactionFailed { operation: String, reason: String },
}
