mod candidate;
mod correction;
mod event_results;
mod learn_result;
mod learning_commit;
mod learning_event;
mod type_definition;

pub use candidate::{KeywordCandidate, LearnableCandidate};
pub use correction::Correction;
pub use event_results::{DismissAllResult, DismissResult, LearningStats, UndoResult};
pub use learn_result::{BatchLearnResult, LearnOutcome, LearnResult, NoSignalReason};
pub use learning_commit::{CommittedKeyword, LearningCommit, UndoOutcome};
pub use learning_event::{LearningEvent, LearningEventType};
pub use type_definition::{KeywordSource, LearnedKeyword, TypeDefinition};
