use std::collections::BTreeMap;

use axum::response::Response;
use serde_json::Value;

use crate::storage::{KeyValueStore, MemoryStore, StorageError};
use crate::workflows::review::domain::{Applicant, ApplicantStats, Rank, Selection};
use crate::workflows::review::roster::Roster;
use crate::workflows::review::ReviewPanel;

pub(super) fn applicant(name: &str) -> Applicant {
    Applicant {
        name: name.to_string(),
        course: "COSC2758".to_string(),
        availability: "Part-time".to_string(),
        skills: "React, CSS".to_string(),
        credentials: "Bachelor of IT".to_string(),
    }
}

pub(super) fn roster(names: &[&str]) -> Vec<Applicant> {
    names.iter().map(|name| applicant(name)).collect()
}

pub(super) fn active(rank: i64) -> Selection {
    Selection {
        comment: String::new(),
        rank: Rank::new(rank),
        unselected: false,
    }
}

pub(super) fn inactive(rank: i64) -> Selection {
    Selection {
        unselected: true,
        ..active(rank)
    }
}

pub(super) fn selections(entries: &[(&str, Selection)]) -> BTreeMap<String, Selection> {
    entries
        .iter()
        .map(|(name, selection)| (name.to_string(), selection.clone()))
        .collect()
}

pub(super) fn stats_for<'a>(stats: &'a [ApplicantStats], name: &str) -> &'a ApplicantStats {
    stats
        .iter()
        .find(|entry| entry.applicant.name == name)
        .unwrap_or_else(|| panic!("no stats for {name}"))
}

pub(super) fn labels(stats: &ApplicantStats) -> (bool, bool, bool) {
    (
        stats.is_most_chosen,
        stats.is_least_chosen,
        stats.is_unchosen,
    )
}

pub(super) fn panel_with(names: &[&str], storage: MemoryStore) -> ReviewPanel<MemoryStore> {
    let mut panel = ReviewPanel::with_roster(Roster::from_applicants(roster(names)), storage);
    panel.load();
    panel
}

pub(super) fn stored_entries(storage: &MemoryStore) -> Value {
    let raw = storage
        .raw(crate::storage::SELECTED_REVIEW_DATA_KEY)
        .expect("review data persisted");
    serde_json::from_str(&raw).expect("persisted review data is json")
}

/// Reads succeed with nothing stored; every write fails.
pub(super) struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read only".to_string()))
    }
}

pub(super) struct OfflineStore;

impl KeyValueStore for OfflineStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }

    fn save(&self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
