//! Query functions operating on a borrowed connection (or a transaction via Deref).

pub mod correction_ops;
pub mod definition_ops;
pub mod event_ops;
pub mod ledger_ops;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use lexis_core::errors::LexisResult;

use crate::to_storage_err;

/// Fixed-width RFC 3339 so that text comparison orders timestamps.
pub(crate) fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(raw: &str) -> LexisResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("invalid timestamp {raw:?}: {e}")))
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> LexisResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn from_json<T: DeserializeOwned>(raw: &str) -> LexisResult<T> {
    Ok(serde_json::from_str(raw)?)
}
