use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by score repositories regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file could not be read.
    #[error("failed to read leaderboard file `{}`", path.display())]
    Read {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Backing file could not be written or replaced.
    #[error("failed to write leaderboard file `{}`", path.display())]
    Write {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Backing file content is not a valid list of score records.
    #[error("failed to decode leaderboard file `{}`", path.display())]
    Decode {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// Records could not be serialized.
    #[error("failed to encode leaderboard for `{}`", path.display())]
    Encode {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
}
