//! Integration tests: atomic learning commits, undo, dismissal, and event aggregates.

use chrono::{Duration, Utc};
use lexis_core::models::*;
use lexis_core::traits::*;
use lexis_core::LexisError;
use lexis_storage::StorageEngine;

fn staged(keyword: &str, sources: &[&str]) -> CommittedKeyword {
    CommittedKeyword {
        keyword: keyword.to_string(),
        correction_count: sources.len() as u32,
        source_corrections: sources.iter().map(|s| s.to_string()).collect(),
    }
}

fn seeded() -> (StorageEngine, TypeDefinition) {
    let engine = StorageEngine::open_in_memory().unwrap();
    let def = TypeDefinition::new("RedBook Valuation", vec![]);
    engine.upsert_definition(&def).unwrap();
    (engine, def)
}

fn commit_for(def: &TypeDefinition, keywords: Vec<CommittedKeyword>) -> LearningCommit {
    LearningCommit {
        file_type_id: def.id.clone(),
        file_type: def.file_type.clone(),
        learned_at: Utc::now(),
        keywords,
    }
}

#[test]
fn commit_learning_patches_definition_and_inserts_events() {
    let (engine, def) = seeded();
    let commit = commit_for(
        &def,
        vec![
            staged("rics", &["c1", "c2", "c3"]),
            staged("surveyor", &["c1", "c2", "c3"]),
        ],
    );

    let events = engine.commit_learning(&commit).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| !e.dismissed && e.correction_count == 3));

    let stored = engine.get_definition_by_id(&def.id).unwrap().unwrap();
    let learned: Vec<_> = stored.learned_keywords.iter().map(|k| k.keyword.as_str()).collect();
    assert_eq!(learned, vec!["rics", "surveyor"]);
    assert!(stored
        .learned_keywords
        .iter()
        .all(|k| k.source == KeywordSource::Correction));
    assert!(stored.last_learned_at.is_some());

    let fetched = engine.get_event(&events[0].id).unwrap().unwrap();
    assert_eq!(fetched.keyword, "rics");
    assert_eq!(fetched.file_type, "RedBook Valuation");
    assert_eq!(fetched.source_corrections, vec!["c1", "c2", "c3"]);
}

#[test]
fn commit_for_missing_definition_leaves_no_events() {
    let (engine, _) = seeded();
    let ghost = TypeDefinition::new("Ghost", vec![]);
    let err = engine
        .commit_learning(&commit_for(&ghost, vec![staged("boo", &["c1"])]))
        .unwrap_err();
    assert!(matches!(err, LexisError::DefinitionNotFound { .. }));
    assert_eq!(engine.count_events().unwrap(), 0);
}

#[test]
fn failure_after_event_inserts_rolls_back_the_whole_commit() {
    let (engine, def) = seeded();
    // Events are inserted before the ledger patch; make the patch fail.
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER freeze_definitions BEFORE UPDATE ON type_definitions
                 BEGIN SELECT RAISE(ABORT, 'definitions are frozen'); END;",
            )
            .unwrap();
            Ok(())
        })
        .unwrap();

    let err = engine
        .commit_learning(&commit_for(
            &def,
            vec![staged("rics", &["c1", "c2", "c3"]), staged("surveyor", &["c1"])],
        ))
        .unwrap_err();

    assert!(matches!(err, LexisError::StorageError(_)), "{err}");
    assert_eq!(engine.count_events().unwrap(), 0);
    assert_eq!(engine.count_contributing_corrections().unwrap(), 0);
    let stored = engine.get_definition_by_id(&def.id).unwrap().unwrap();
    assert!(stored.learned_keywords.is_empty());
    assert!(stored.last_learned_at.is_none());
}

#[test]
fn undo_only_strips_the_entry_its_own_pass_wrote() {
    let (engine, def) = seeded();
    let mut first = commit_for(&def, vec![staged("rics", &["c1"])]);
    first.learned_at = Utc::now() - Duration::minutes(5);
    let stale = engine.commit_learning(&first).unwrap();
    engine.commit_undo(&stale[0].id).unwrap();

    let live = engine
        .commit_learning(&commit_for(&def, vec![staged("rics", &["c2"])]))
        .unwrap();
    let outcome = engine.commit_undo(&stale[0].id).unwrap().unwrap();

    assert!(!outcome.keyword_removed);
    let stored = engine.get_definition_by_id(&def.id).unwrap().unwrap();
    assert_eq!(stored.learned_keywords.len(), 1);
    assert!(!engine.get_event(&live[0].id).unwrap().unwrap().dismissed);
}

#[test]
fn undo_strips_keyword_and_dismisses_event() {
    let (engine, def) = seeded();
    let events = engine
        .commit_learning(&commit_for(&def, vec![staged("rics", &["c1", "c2", "c3"])]))
        .unwrap();

    let outcome = engine.commit_undo(&events[0].id).unwrap().unwrap();
    assert!(outcome.keyword_removed);
    assert_eq!(outcome.keyword, "rics");

    let stored = engine.get_definition_by_id(&def.id).unwrap().unwrap();
    assert!(stored.learned_keywords.is_empty());
    assert!(engine.get_event(&events[0].id).unwrap().unwrap().dismissed);

    let again = engine.commit_undo(&events[0].id).unwrap().unwrap();
    assert!(!again.keyword_removed);
    assert!(engine.get_event(&events[0].id).unwrap().unwrap().dismissed);
}

#[test]
fn undo_of_unknown_event_is_none() {
    let (engine, _) = seeded();
    assert!(engine.commit_undo("nope").unwrap().is_none());
}

#[test]
fn recent_events_are_most_recent_first_and_filter_dismissed() {
    let (engine, def) = seeded();
    let mut older = commit_for(&def, vec![staged("rics", &["c1"])]);
    older.learned_at = Utc::now() - Duration::hours(2);
    let first = engine.commit_learning(&older).unwrap();
    let second = engine
        .commit_learning(&commit_for(&def, vec![staged("surveyor", &["c2"])]))
        .unwrap();

    let all = engine.recent_events(10, true).unwrap();
    assert_eq!(all[0].id, second[0].id);
    assert_eq!(all[1].id, first[0].id);

    assert!(engine.dismiss_event(&second[0].id).unwrap());
    let visible = engine.recent_events(10, false).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, first[0].id);

    assert_eq!(engine.recent_events(1, true).unwrap().len(), 1);
}

#[test]
fn dismiss_is_idempotent_and_dismiss_all_counts_flips() {
    let (engine, def) = seeded();
    let events = engine
        .commit_learning(&commit_for(
            &def,
            vec![staged("a", &["c1"]), staged("b", &["c1"]), staged("c", &["c1"])],
        ))
        .unwrap();

    assert!(engine.dismiss_event(&events[0].id).unwrap());
    assert!(engine.dismiss_event(&events[0].id).unwrap());
    assert!(!engine.dismiss_event("missing").unwrap());

    assert_eq!(engine.dismiss_all().unwrap(), 2);
    assert_eq!(engine.dismiss_all().unwrap(), 0);
}

#[test]
fn aggregates_count_windows_and_distinct_contributors() {
    let (engine, def) = seeded();
    let mut old = commit_for(&def, vec![staged("old", &["c1", "c2"])]);
    old.learned_at = Utc::now() - Duration::days(20);
    engine.commit_learning(&old).unwrap();
    engine
        .commit_learning(&commit_for(&def, vec![staged("new", &["c2", "c3"])]))
        .unwrap();

    assert_eq!(engine.count_events().unwrap(), 2);
    assert_eq!(
        engine
            .count_events_since(Utc::now() - Duration::days(7))
            .unwrap(),
        1
    );
    assert_eq!(
        engine
            .count_events_since(Utc::now() - Duration::days(30))
            .unwrap(),
        2
    );
    assert_eq!(engine.count_contributing_corrections().unwrap(), 3);
}
