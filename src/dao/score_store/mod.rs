/// JSON file implementation.
mod json_file;

pub use json_file::JsonFileScoreStore;

use crate::{dao::storage::StorageResult, state::score::ScoreRecord};

/// Abstraction over the durable medium backing the leaderboard.
pub trait ScoreStore: Send + Sync {
    /// Read every persisted record. `Ok(None)` means nothing has been persisted yet.
    fn load(&self) -> StorageResult<Option<Vec<ScoreRecord>>>;
    /// Replace the persisted content with `records`, in the given order.
    fn persist(&self, records: &[ScoreRecord]) -> StorageResult<()>;
}
