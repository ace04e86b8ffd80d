//! Known-vocabulary filter.

use std::collections::HashSet;

use lexis_core::keyword;
use lexis_core::models::TypeDefinition;

/// Everything a definition already knows, curated and learned, normalized.
#[derive(Debug, Clone, Default)]
pub struct KnownVocabulary {
    known: HashSet<String>,
}

impl KnownVocabulary {
    pub fn from_definition(definition: &TypeDefinition) -> Self {
        let known = definition
            .keywords
            .iter()
            .map(String::as_str)
            .chain(definition.learned_keywords.iter().map(|l| l.keyword.as_str()))
            .filter_map(keyword::normalize)
            .collect();
        Self { known }
    }

    pub fn contains(&self, raw: &str) -> bool {
        keyword::normalize(raw).is_some_and(|kw| self.known.contains(&kw))
    }

    /// Keep the unknown keywords, preserving order.
    pub fn filter<I, S>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        candidates
            .into_iter()
            .map(Into::into)
            .filter(|kw| !self.contains(kw))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lexis_core::models::{KeywordSource, LearnedKeyword};

    fn definition() -> TypeDefinition {
        let mut def = TypeDefinition::new("Valuation", vec!["Valuation".into(), " RICS ".into()]);
        def.learned_keywords.push(LearnedKeyword {
            keyword: "surveyor".into(),
            source: KeywordSource::Correction,
            added_at: Utc::now(),
            correction_count: 3,
        });
        def
    }

    #[test]
    fn curated_and_learned_are_both_known() {
        let vocab = KnownVocabulary::from_definition(&definition());
        assert!(vocab.contains("valuation"));
        assert!(vocab.contains("rics"));
        assert!(vocab.contains("Surveyor"));
        assert!(!vocab.contains("redbook"));
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn filter_keeps_order_of_unknowns() {
        let vocab = KnownVocabulary::from_definition(&definition());
        let kept = vocab.filter(["redbook", "valuation", "market", "surveyor"]);
        assert_eq!(kept, vec!["redbook", "market"]);
    }

    #[test]
    fn blank_candidate_is_never_known() {
        let vocab = KnownVocabulary::from_definition(&definition());
        assert!(!vocab.contains("   "));
    }
}
