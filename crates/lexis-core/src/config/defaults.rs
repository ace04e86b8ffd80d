// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "lexis.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Learning ---
pub const DEFAULT_MIN_CORRECTIONS: usize = 3;
pub const DEFAULT_MIN_FREQUENCY: f64 = 0.5;
pub const DEFAULT_RECENT_EVENTS_LIMIT: usize = 50;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
