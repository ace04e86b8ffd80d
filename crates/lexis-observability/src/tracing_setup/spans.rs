//! Span definitions per operation: targeted learning, batch learning, undo.

/// Create a span for one targeted learning pass.
#[macro_export]
macro_rules! learning_span {
    ($file_type:expr) => {
        tracing::info_span!("lexis.learn", file_type = %$file_type)
    };
}

/// Create a span for a batch pass over every corrected type.
#[macro_export]
macro_rules! batch_learning_span {
    ($type_count:expr) => {
        tracing::info_span!("lexis.learn_all", type_count = $type_count)
    };
}

/// Create a span for an undo of one learning event.
#[macro_export]
macro_rules! undo_span {
    ($event_id:expr) => {
        tracing::info_span!("lexis.undo", event_id = %$event_id)
    };
}
