//! Per-group keyword frequency analysis.

use std::collections::{BTreeMap, BTreeSet};

use lexis_core::keyword;

use crate::grouping::CorrectionGroup;

/// How many corrections in a group mention a keyword.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordStat {
    pub occurrences: u32,
    /// `occurrences / group_size`, in [0, 1].
    pub frequency: f64,
}

/// Normalized keyword → stat for one correction group.
#[derive(Debug, Clone, Default)]
pub struct KeywordFrequencies {
    group_size: usize,
    stats: BTreeMap<String, KeywordStat>,
}

impl KeywordFrequencies {
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn get(&self, keyword: &str) -> Option<KeywordStat> {
        self.stats.get(keyword).copied()
    }

    /// Keywords in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, KeywordStat)> {
        self.stats.iter().map(|(k, s)| (k.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Count, for each normalized keyword, the corrections that mention it.
///
/// Normalization happens here and nowhere else in the pipeline. A keyword
/// listed twice in one correction counts once; blank keywords are ignored.
pub fn analyze_group(group: &CorrectionGroup) -> KeywordFrequencies {
    let group_size = group.len();
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();

    for correction in &group.corrections {
        let distinct: BTreeSet<String> = correction
            .document_keywords
            .iter()
            .filter_map(|raw| keyword::normalize(raw))
            .collect();
        for kw in distinct {
            *counts.entry(kw).or_insert(0) += 1;
        }
    }

    let stats = counts
        .into_iter()
        .map(|(kw, occurrences)| {
            let frequency = if group_size == 0 {
                0.0
            } else {
                f64::from(occurrences) / group_size as f64
            };
            (
                kw,
                KeywordStat {
                    occurrences,
                    frequency,
                },
            )
        })
        .collect();

    KeywordFrequencies { group_size, stats }
}
