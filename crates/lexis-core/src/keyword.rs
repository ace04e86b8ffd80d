//! Keyword normalization shared by every vocabulary comparison.

/// Normalize a raw keyword: trim surrounding whitespace, then lowercase.
///
/// Returns `None` when nothing is left after trimming.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive keyword equality after normalization.
pub fn same_keyword(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
