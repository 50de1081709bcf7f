use crate::workflows::review::domain::{Rank, SelectionEntry};
use crate::workflows::review::selection::{SelectionError, SelectionStore};

#[test]
fn toggle_creates_active_record_with_defaults() {
    let mut store = SelectionStore::new();
    let selection = store.toggle("Leo Wang").clone();

    assert!(selection.is_active());
    assert_eq!(selection.comment, "");
    assert_eq!(selection.rank, Rank::DEFAULT);
    assert_eq!(store.len(), 1);
}

#[test]
fn toggle_off_keeps_the_record_but_clears_fields() {
    let mut store = SelectionStore::new();
    store.toggle("Leo Wang");
    store
        .update_comment("Leo Wang", "strong Java background")
        .expect("record exists");
    store
        .update_rank("Leo Wang", Rank::new(4))
        .expect("record exists");

    let selection = store.toggle("Leo Wang").clone();
    assert!(!selection.is_active());
    assert_eq!(selection.comment, "");
    assert_eq!(selection.rank, Rank::DEFAULT);
    assert!(store.get("Leo Wang").is_some());
    assert!(store.active("Leo Wang").is_none());
}

#[test]
fn toggle_twice_restores_flag_but_not_fields() {
    let mut store = SelectionStore::new();
    store.toggle("Jess Smith");
    store
        .update_comment("Jess Smith", "keep")
        .expect("record exists");

    store.toggle("Jess Smith");
    let reselected = store.toggle("Jess Smith").clone();

    assert!(reselected.is_active());
    assert_eq!(reselected.comment, "");
    assert_eq!(reselected.rank, Rank::DEFAULT);
}

#[test]
fn updates_require_an_existing_record() {
    let mut store = SelectionStore::new();

    assert_eq!(
        store.update_comment("Nobody", "hello").unwrap_err(),
        SelectionError::UnknownApplicant("Nobody".to_string())
    );
    assert_eq!(
        store.update_rank("Nobody", Rank::new(2)).unwrap_err(),
        SelectionError::UnknownApplicant("Nobody".to_string())
    );
    assert!(store.is_empty());
}

#[test]
fn rank_updates_are_stored_verbatim() {
    let mut store = SelectionStore::new();
    store.toggle("Leo Wang");

    for rank in [Rank::new(0), Rank::new(9), Rank::NOT_A_NUMBER, Rank::new(3)] {
        let stored = store.update_rank("Leo Wang", rank).expect("record exists");
        assert_eq!(stored.rank, rank);
    }
}

#[test]
fn updates_apply_to_unselected_records_too() {
    let mut store = SelectionStore::new();
    store.toggle("Leo Wang");
    store.toggle("Leo Wang");

    let selection = store
        .update_comment("Leo Wang", "parked")
        .expect("record still exists")
        .clone();
    assert!(!selection.is_active());
    assert_eq!(selection.comment, "parked");
}

#[test]
fn entries_round_trip_and_keep_first_duplicate() {
    let entry = |name: &str, comment: &str| SelectionEntry {
        name: name.to_string(),
        comment: comment.to_string(),
        rank: Rank::new(2),
        unselected: false,
    };

    let (store, duplicates) = SelectionStore::from_entries(vec![
        entry("Leo Wang", "first"),
        entry("Jess Smith", "other"),
        entry("Leo Wang", "second"),
    ]);

    assert_eq!(duplicates, 1);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("Leo Wang").map(|s| s.comment.as_str()), Some("first"));

    let (rebuilt, _) = SelectionStore::from_entries(store.entries());
    assert_eq!(rebuilt, store);
}
