//! Pretty-printed JSON file backend for the leaderboard.

use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    dao::{
        score_store::ScoreStore,
        storage::{StorageError, StorageResult},
    },
    state::score::ScoreRecord,
};

/// Stores the leaderboard as a JSON array in a single file, rewritten in full on every persist.
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    /// Store backed by the file at `path`; nothing is read until [`ScoreStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used to stage a write before it replaces the real file.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("leaderboard"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&self) -> StorageResult<Option<Vec<ScoreRecord>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    fn persist(&self, records: &[ScoreRecord]) -> StorageResult<()> {
        let payload =
            serde_json::to_vec_pretty(records).map_err(|source| StorageError::Encode {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let staging = self.staging_path();
        fs::write(&staging, payload).map_err(|source| self.write_error(source))?;
        fs::rename(&staging, &self.path).map_err(|source| {
            let _ = fs::remove_file(&staging);
            self.write_error(source)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<ScoreRecord> {
        vec![
            ScoreRecord::new("Ann", 100, 1),
            ScoreRecord::new("Cid", 100, 3),
            ScoreRecord::new("Bob", 90, 2),
        ]
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileScoreStore::new(dir.path().join("leaderboard.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn persisted_records_load_back_in_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileScoreStore::new(dir.path().join("leaderboard.json"));

        store.persist(&sample()).unwrap();

        assert_eq!(store.load().unwrap(), Some(sample()));
        assert!(!store.staging_path().exists());
    }

    #[test]
    fn persist_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileScoreStore::new(dir.path().join("leaderboard.json"));

        store.persist(&sample()).unwrap();
        let replacement = vec![ScoreRecord::new("Dee", 5, 9)];
        store.persist(&replacement).unwrap();

        assert_eq!(store.load().unwrap(), Some(replacement));
    }

    #[test]
    fn persist_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/data/leaderboard.json");
        let store = JsonFileScoreStore::new(&path);

        store.persist(&sample()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn file_is_human_readable_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");
        let store = JsonFileScoreStore::new(&path);

        store.persist(&sample()[..1]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "name": "Ann", "score": 100, "timestamp": 1 }])
        );
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileScoreStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Decode { .. }));
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file.
        let err = JsonFileScoreStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = JsonFileScoreStore::new(blocker.join("leaderboard.json"));
        let err = store.persist(&sample()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
