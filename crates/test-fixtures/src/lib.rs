//! Test support for the Lexis workspace: an in-memory store implementing
//! every repository trait, model builders, and a loader for the golden
//! learning scenarios shipped alongside this crate.

pub mod builders;
pub mod golden;
pub mod memory_store;

pub use builders::{correction, correction_at, definition};
pub use golden::{load_scenario, GoldenScenario};
pub use memory_store::InMemoryLearningStore;
