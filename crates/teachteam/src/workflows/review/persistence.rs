use serde_json::Value;
use tracing::{debug, warn};

use super::domain::SelectionEntry;
use super::selection::SelectionStore;
use crate::storage::{KeyValueStore, StorageError, SELECTED_REVIEW_DATA_KEY};

/// Whether the persisted selections have been read yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Pending,
    Ready,
}

/// Result of a write-back request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Written,
    /// The load had not happened yet, so nothing was written.
    Discarded,
}

/// Loads the selection store once and writes it back in full after each mutation.
///
/// Write-backs requested before [`SelectionSync::load`] completes are dropped so an empty
/// in-memory store can never replace good persisted data.
#[derive(Debug)]
pub struct SelectionSync<S> {
    storage: S,
    state: SyncState,
}

impl<S: KeyValueStore> SelectionSync<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: SyncState::Pending,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SyncState::Ready
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted store. Never fails: anything unreadable yields an empty store.
    pub fn load(&mut self) -> SelectionStore {
        let store = match self.storage.load(SELECTED_REVIEW_DATA_KEY) {
            Ok(Some(blob)) => match decode_selections(&blob) {
                Ok(decoded) => {
                    if decoded.skipped > 0 || decoded.duplicates > 0 {
                        warn!(
                            skipped = decoded.skipped,
                            duplicates = decoded.duplicates,
                            "ignored unreadable review entries"
                        );
                    }
                    decoded.store
                }
                Err(err) => {
                    warn!(error = %err, "error loading review data; starting empty");
                    SelectionStore::new()
                }
            },
            Ok(None) => SelectionStore::new(),
            Err(err) => {
                warn!(error = %err, "review data unavailable; starting empty");
                SelectionStore::new()
            }
        };

        self.state = SyncState::Ready;
        debug!(records = store.len(), "review selections loaded");
        store
    }

    /// Overwrite the persisted store with `store`, unless the initial load is still pending.
    pub fn persist(&self, store: &SelectionStore) -> Result<PersistOutcome, PersistError> {
        if self.state == SyncState::Pending {
            debug!("discarding review write-back issued before load");
            return Ok(PersistOutcome::Discarded);
        }

        let blob = encode_selections(store)?;
        self.storage.save(SELECTED_REVIEW_DATA_KEY, &blob)?;
        debug!(records = store.len(), "review selections persisted");
        Ok(PersistOutcome::Written)
    }
}

/// Selections recovered from a persisted blob.
#[derive(Debug)]
pub struct DecodedSelections {
    pub store: SelectionStore,
    pub skipped: usize,
    pub duplicates: usize,
}

pub fn decode_selections(blob: &str) -> Result<DecodedSelections, DecodeError> {
    let value: Value = serde_json::from_str(blob)?;
    let Value::Array(items) = value else {
        return Err(DecodeError::NotASequence);
    };

    let total = items.len();
    let entries: Vec<SelectionEntry> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    let skipped = total - entries.len();
    let (store, duplicates) = SelectionStore::from_entries(entries);

    Ok(DecodedSelections {
        store,
        skipped,
        duplicates,
    })
}

pub fn encode_selections(store: &SelectionStore) -> Result<String, serde_json::Error> {
    serde_json::to_string(&store.entries())
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("review data is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("review data is not a sequence")]
    NotASequence,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to encode review data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
