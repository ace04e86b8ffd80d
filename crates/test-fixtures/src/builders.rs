//! Terse constructors for test data.

use chrono::{Duration, Utc};
use lexis_core::models::{Correction, TypeDefinition};

/// A correction created now.
pub fn correction(predicted: &str, corrected: Option<&str>, keywords: &[&str]) -> Correction {
    Correction::new(
        predicted,
        corrected.map(str::to_string),
        keywords.iter().map(|k| k.to_string()).collect(),
    )
}

/// A correction created `seconds_ago` seconds in the past, for ordering tests.
pub fn correction_at(
    predicted: &str,
    corrected: Option<&str>,
    keywords: &[&str],
    seconds_ago: i64,
) -> Correction {
    let mut c = correction(predicted, corrected, keywords);
    c.created_at = Utc::now() - Duration::seconds(seconds_ago);
    c
}

/// A definition with the given curated keywords and an empty learned ledger.
pub fn definition(file_type: &str, keywords: &[&str]) -> TypeDefinition {
    TypeDefinition::new(file_type, keywords.iter().map(|k| k.to_string()).collect())
}
