//! # lexis-learning
//!
//! Keyword learning from correction history: pattern grouping → frequency
//! analysis → threshold gate → known-vocabulary filter → atomic commit.
//! The event log supports listing, stats, dismiss, and undo.

pub mod engine;
pub mod event_log;
pub mod frequency;
pub mod grouping;
pub mod threshold;
pub mod vocabulary;

pub use engine::LearningEngine;
pub use event_log::LearningEventLog;
pub use frequency::{analyze_group, KeywordFrequencies, KeywordStat};
pub use grouping::{group_corrections, CorrectionGroup, PatternKey};
pub use threshold::ThresholdGate;
pub use vocabulary::KnownVocabulary;
