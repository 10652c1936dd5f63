//! Ranked, bounded and persisted collection of score records.

use std::{
    cmp::Ordering as RankOrdering,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    dao::score_store::ScoreStore,
    state::score::{ScoreRecord, is_valid_name, is_valid_score},
};

/// Number of records retained on the leaderboard.
pub const MAX_ENTRIES: usize = 10;

/// Reasons a submission is rejected before touching the leaderboard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Name is empty or whitespace only.
    #[error("name is blank")]
    BlankName,
    /// Score is below zero.
    #[error("score {0} is negative")]
    NegativeScore(i32),
}

/// Result of an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// 1-based position of the new record, `None` when it did not make the cut.
    pub rank: Option<usize>,
    /// False when the backing file could not be updated.
    pub persisted: bool,
}

impl SubmitOutcome {
    /// In-memory and persisted state have diverged.
    pub fn is_degraded(&self) -> bool {
        !self.persisted
    }
}

/// Top-N leaderboard synchronized with a [`ScoreStore`].
///
/// A single mutex guards the ranked entries. Submissions hold it across the
/// persist step so memory and disk are always updated in the same order.
pub struct Leaderboard {
    entries: Mutex<Vec<ScoreRecord>>,
    store: Arc<dyn ScoreStore>,
    degraded: AtomicBool,
}

impl Leaderboard {
    /// Build the leaderboard from whatever `store` currently holds.
    ///
    /// Load failures are logged and the leaderboard starts empty.
    pub fn load(store: Arc<dyn ScoreStore>) -> Self {
        let entries = match store.load() {
            Ok(Some(records)) => {
                let entries = rank_loaded(records);
                info!(count = entries.len(), "loaded leaderboard");
                entries
            }
            Ok(None) => {
                info!("no persisted leaderboard found; starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "failed to load leaderboard; starting empty");
                Vec::new()
            }
        };

        Self {
            entries: Mutex::new(entries),
            store,
            degraded: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current ranking, highest first.
    pub fn list_top(&self) -> Vec<ScoreRecord> {
        self.lock().clone()
    }

    /// Number of records currently on the leaderboard.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no score has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while the last persist attempt has failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// Rank `record` into the leaderboard and persist the result.
    ///
    /// Names are trimmed and truncated; blank names and negative scores are
    /// rejected without any state change. A persistence failure does not undo
    /// the in-memory update; it is logged and reported through
    /// [`SubmitOutcome::persisted`].
    pub fn submit(&self, record: ScoreRecord) -> Result<SubmitOutcome, SubmitError> {
        let record = normalize(record)?;

        let mut entries = self.lock();
        let position = entries.partition_point(|existing| {
            existing.rank_cmp(&record) != RankOrdering::Greater
        });
        entries.insert(position, record);
        entries.truncate(MAX_ENTRIES);
        let rank = (position < MAX_ENTRIES).then_some(position + 1);

        let persisted = match self.store.persist(&entries) {
            Ok(()) => {
                if self.degraded.swap(false, Ordering::AcqRel) {
                    info!("leaderboard persisted again; leaving degraded mode");
                }
                true
            }
            Err(err) => {
                warn!(
                    error = %err,
                    "failed to persist leaderboard; keeping in-memory state"
                );
                self.degraded.store(true, Ordering::Release);
                false
            }
        };
        drop(entries);

        debug!(?rank, persisted, "score submitted");
        Ok(SubmitOutcome { rank, persisted })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScoreRecord>> {
        // Every mutation leaves the vector fully formed, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize(record: ScoreRecord) -> Result<ScoreRecord, SubmitError> {
    if !is_valid_name(record.name()) {
        return Err(SubmitError::BlankName);
    }
    if !is_valid_score(record.score()) {
        return Err(SubmitError::NegativeScore(record.score()));
    }
    record.normalized().ok_or(SubmitError::BlankName)
}

/// Re-validate, re-sort and bound records read back from storage.
fn rank_loaded(records: Vec<ScoreRecord>) -> Vec<ScoreRecord> {
    let total = records.len();
    let mut entries: Vec<ScoreRecord> = records
        .iter()
        .filter_map(ScoreRecord::normalized)
        .collect();
    if entries.len() != total {
        warn!(
            dropped = total - entries.len(),
            "ignoring invalid persisted leaderboard records"
        );
    }
    entries.sort_by(ScoreRecord::rank_cmp);
    entries.truncate(MAX_ENTRIES);
    entries
}
