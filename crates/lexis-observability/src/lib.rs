//! # lexis-observability
//!
//! Structured tracing for the keyword-learning engine: subscriber setup
//! driven by [`lexis_core::config::ObservabilityConfig`], span macros, and
//! one structured event per learning operation.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_from_config, init_tracing_with_filter};
