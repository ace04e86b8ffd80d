use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a learning pass found nothing new to add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NoSignalReason {
    /// No keyword reached the frequency threshold.
    NoCommonKeywords,
    /// Keywords reached the threshold but every one is already known.
    AlreadyLearned,
}

/// Outcome of one targeted learning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum LearnOutcome {
    /// New keywords were committed together with their learning events.
    Learned {
        keywords: Vec<String>,
        event_ids: Vec<String>,
    },
    /// No correction group reached the minimum size.
    NotEligible { largest_group: usize, required: usize },
    NoSignal { reason: NoSignalReason },
    /// No definition exists for the corrected type.
    TargetNotFound,
    /// The store rejected the pass. Only produced by batch mode; a direct
    /// targeted call propagates the error instead.
    Failed { message: String },
}

/// Structured result of learning for one corrected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearnResult {
    pub file_type: String,
    pub outcome: LearnOutcome,
}

impl LearnResult {
    pub fn new(file_type: impl Into<String>, outcome: LearnOutcome) -> Self {
        Self {
            file_type: file_type.into(),
            outcome,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.outcome, LearnOutcome::Learned { .. })
    }

    /// Human-readable reason, stable enough for display and reporting.
    pub fn reason(&self) -> &'static str {
        match &self.outcome {
            LearnOutcome::Learned { .. } => "Keywords learned",
            LearnOutcome::NotEligible { .. } => "Not enough corrections",
            LearnOutcome::NoSignal {
                reason: NoSignalReason::NoCommonKeywords,
            } => "No common keywords found",
            LearnOutcome::NoSignal {
                reason: NoSignalReason::AlreadyLearned,
            } => "Keywords already learned",
            LearnOutcome::TargetNotFound => "File type definition not found",
            LearnOutcome::Failed { .. } => "Store failure",
        }
    }

    /// Keywords committed by this pass (empty unless successful).
    pub fn learned_keywords(&self) -> &[String] {
        match &self.outcome {
            LearnOutcome::Learned { keywords, .. } => keywords,
            _ => &[],
        }
    }
}

/// Result of learning across every corrected type seen in history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchLearnResult {
    /// Number of corrected types processed.
    pub processed: usize,
    /// Total keywords learned across all types.
    pub learned: usize,
    pub per_type: Vec<LearnResult>,
}
