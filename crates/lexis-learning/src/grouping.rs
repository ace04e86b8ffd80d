//! Partition corrections by (predicted type, corrected type).

use std::collections::HashMap;
use std::fmt;

use lexis_core::models::Correction;

/// Ordered pair identifying a correction pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternKey {
    pub predicted_type: String,
    pub corrected_type: String,
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.predicted_type, self.corrected_type)
    }
}

/// Corrections sharing one pattern, in creation order.
#[derive(Debug, Clone)]
pub struct CorrectionGroup {
    pub key: PatternKey,
    pub corrections: Vec<Correction>,
}

impl CorrectionGroup {
    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Correction ids in creation order, used as provenance.
    pub fn source_ids(&self) -> Vec<String> {
        self.corrections.iter().map(|c| c.id.clone()).collect()
    }
}

/// Group the corrections that carry a learning signal.
///
/// Confirmations, unchanged types and keywordless corrections are dropped
/// before grouping. Input order is preserved inside each group; groups are
/// returned in order of first appearance.
pub fn group_corrections(corrections: &[Correction]) -> Vec<CorrectionGroup> {
    let mut index: HashMap<PatternKey, usize> = HashMap::new();
    let mut groups: Vec<CorrectionGroup> = Vec::new();

    for correction in corrections.iter().filter(|c| c.is_learning_signal()) {
        let Some(corrected_type) = &correction.corrected_type else {
            continue;
        };
        let key = PatternKey {
            predicted_type: correction.predicted_type.clone(),
            corrected_type: corrected_type.clone(),
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(CorrectionGroup {
                key,
                corrections: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].corrections.push(correction.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correction(predicted: &str, corrected: Option<&str>, keywords: &[&str]) -> Correction {
        Correction::new(
            predicted,
            corrected.map(str::to_string),
            keywords.iter().map(|k| k.to_string()).collect(),
        )
    }

    #[test]
    fn groups_by_ordered_pair() {
        let corrections = vec![
            correction("IMR", Some("Valuation"), &["rics"]),
            correction("Valuation", Some("IMR"), &["rics"]),
            correction("IMR", Some("Valuation"), &["surveyor"]),
        ];
        let groups = group_corrections(&corrections);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key.predicted_type, "IMR");
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].key.to_string(), "Valuation -> IMR");
    }

    #[test]
    fn drops_corrections_without_signal() {
        let corrections = vec![
            correction("IMR", None, &["rics"]),
            correction("IMR", Some("IMR"), &["rics"]),
            correction("IMR", Some("Valuation"), &[]),
        ];
        assert!(group_corrections(&corrections).is_empty());
    }

    #[test]
    fn preserves_creation_order_within_group() {
        let corrections = vec![
            correction("IMR", Some("Valuation"), &["a"]),
            correction("Deed", Some("Valuation"), &["b"]),
            correction("IMR", Some("Valuation"), &["c"]),
        ];
        let groups = group_corrections(&corrections);
        assert_eq!(
            groups[0].source_ids(),
            vec![corrections[0].id.clone(), corrections[2].id.clone()]
        );
    }
}
