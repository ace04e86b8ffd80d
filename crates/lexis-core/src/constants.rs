/// Event type recorded for every keyword committed by the learning applier.
pub const EVENT_KEYWORD_LEARNED: &str = "keyword_learned";

/// Trailing window for the "this week" learning statistic.
pub const STATS_WEEK_DAYS: i64 = 7;

/// Trailing window for the "this month" learning statistic.
pub const STATS_MONTH_DAYS: i64 = 30;

/// Upper bound on a single recent-events listing.
pub const MAX_RECENT_EVENTS: usize = 1000;
