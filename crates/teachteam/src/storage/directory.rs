use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Keeps one `<key>.json` file per logical key inside a data directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirectoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_error = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(io_error)?;

        // Write to a sibling file first so a crash never leaves a truncated blob behind.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, blob).map_err(io_error)?;
        fs::rename(&staging, &path).map_err(io_error)?;

        debug!(key, bytes = blob.len(), path = %path.display(), "persisted blob");
        Ok(())
    }
}
