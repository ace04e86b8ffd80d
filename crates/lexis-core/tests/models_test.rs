use chrono::{DateTime, Duration, Utc};
use lexis_core::models::*;

fn correction(predicted: &str, corrected: Option<&str>, keywords: &[&str]) -> Correction {
    Correction::new(
        predicted,
        corrected.map(str::to_string),
        keywords.iter().map(|k| k.to_string()).collect(),
    )
}

#[test]
fn correction_with_changed_type_and_keywords_is_signal() {
    assert!(correction("IMR", Some("RedBook Valuation"), &["rics"]).is_learning_signal());
}

#[test]
fn confirmation_is_not_signal() {
    assert!(!correction("IMR", None, &["rics"]).is_learning_signal());
    assert!(!correction("IMR", Some("IMR"), &["rics"]).is_learning_signal());
}

#[test]
fn correction_without_keywords_is_not_signal() {
    assert!(!correction("IMR", Some("RedBook Valuation"), &[]).is_learning_signal());
}

fn learned(keyword: &str, source: KeywordSource, added_at: DateTime<Utc>) -> LearnedKeyword {
    LearnedKeyword {
        keyword: keyword.into(),
        source,
        added_at,
        correction_count: 3,
    }
}

#[test]
fn knows_curated_and_learned_case_insensitively() {
    let mut def = TypeDefinition::new("RedBook Valuation", vec!["Valuation".into()]);
    def.learned_keywords
        .push(learned("rics", KeywordSource::Correction, Utc::now()));
    assert!(def.knows("valuation"));
    assert!(def.knows(" RICS "));
    assert!(!def.knows("surveyor"));
}

#[test]
fn remove_learned_at_only_touches_the_matching_pass() {
    let first = Utc::now() - Duration::hours(1);
    let second = Utc::now();
    let mut def = TypeDefinition::new("RedBook Valuation", vec![]);
    def.learned_keywords
        .push(learned("rics", KeywordSource::Correction, second));
    def.learned_keywords
        .push(learned("surveyor", KeywordSource::Manual, first));

    assert!(!def.remove_learned_at("rics", first), "older pass owns nothing now");
    assert!(!def.remove_learned_at("surveyor", first), "manual entries stay");
    assert!(def.remove_learned_at(" Rics ", second));
    assert_eq!(def.learned_keywords.len(), 1);
    assert!(!def.remove_learned_at("rics", second), "second removal is a no-op");
}

#[test]
fn learn_result_reasons_match_outcomes() {
    let cases = [
        (
            LearnOutcome::NotEligible {
                largest_group: 2,
                required: 3,
            },
            "Not enough corrections",
        ),
        (
            LearnOutcome::NoSignal {
                reason: NoSignalReason::NoCommonKeywords,
            },
            "No common keywords found",
        ),
        (
            LearnOutcome::NoSignal {
                reason: NoSignalReason::AlreadyLearned,
            },
            "Keywords already learned",
        ),
        (LearnOutcome::TargetNotFound, "File type definition not found"),
    ];
    for (outcome, reason) in cases {
        let result = LearnResult::new("T", outcome);
        assert!(!result.success());
        assert_eq!(result.reason(), reason);
        assert!(result.learned_keywords().is_empty());
    }
}

#[test]
fn learned_outcome_exposes_keywords() {
    let result = LearnResult::new(
        "T",
        LearnOutcome::Learned {
            keywords: vec!["rics".into()],
            event_ids: vec!["e1".into()],
        },
    );
    assert!(result.success());
    assert_eq!(result.learned_keywords(), ["rics".to_string()]);
}

#[test]
fn learning_event_serializes_event_type_as_snake_case() {
    let event = LearningEvent {
        id: "e1".into(),
        event_type: LearningEventType::KeywordLearned,
        file_type_id: "d1".into(),
        file_type: "RedBook Valuation".into(),
        keyword: "rics".into(),
        correction_count: 3,
        source_corrections: vec!["c1".into(), "c2".into(), "c3".into()],
        created_at: Utc::now(),
        dismissed: false,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["event_type"], "keyword_learned");
    assert_eq!(
        LearningEventType::parse("keyword_learned"),
        Some(LearningEventType::KeywordLearned)
    );
}

#[test]
fn outcome_is_internally_tagged() {
    let json = serde_json::to_value(LearnOutcome::TargetNotFound).unwrap();
    assert_eq!(json["kind"], "target_not_found");
}
