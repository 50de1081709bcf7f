//! String-keyed blob storage shared by the review, roster, and login workflows.
//!
//! Every logical key holds exactly one serialized JSON document that is overwritten in full on
//! each save.

mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;

use std::sync::Arc;

/// Demo credential pair consumed by the login flow.
pub const USER_KEY: &str = "user";
/// The most recently submitted tutor application.
pub const TUTOR_APPLICATION_KEY: &str = "tutorApplication";
/// Serialized selection store written by the review panel.
pub const SELECTED_REVIEW_DATA_KEY: &str = "selectedReviewData";

/// Storage abstraction so the review workflow can be exercised without a real backend.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        (**self).save(key, blob)
    }
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("storage io failure for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
