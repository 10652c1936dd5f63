use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a submitted name.
pub const MAX_NAME_CHARS: usize = 20;

/// One leaderboard submission. The field names double as the persisted schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    name: String,
    score: i32,
    /// Milliseconds since the Unix epoch, assigned by the server.
    timestamp: i64,
}

impl ScoreRecord {
    /// Build a record; validation happens when it is submitted.
    pub fn new(name: impl Into<String>, score: i32, timestamp: i64) -> Self {
        Self {
            name: name.into(),
            score,
            timestamp,
        }
    }

    /// Player name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Points scored.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Submission time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Rank ordering: higher score first, earlier submission first on a tie.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }

    /// Return a copy carrying the normalized name, or `None` when the record
    /// fails validation.
    pub(crate) fn normalized(&self) -> Option<Self> {
        if !is_valid_score(self.score) {
            return None;
        }
        let name = normalize_name(&self.name)?;
        Some(Self {
            name,
            score: self.score,
            timestamp: self.timestamp,
        })
    }
}

/// A name is valid when it has at least one non-whitespace character.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Scores cannot be negative.
pub fn is_valid_score(score: i32) -> bool {
    score >= 0
}

/// Trim surrounding whitespace and keep at most [`MAX_NAME_CHARS`] characters.
///
/// Returns `None` for blank names.
pub fn normalize_name(name: &str) -> Option<String> {
    if !is_valid_name(name) {
        return None;
    }
    Some(name.trim().chars().take(MAX_NAME_CHARS).collect())
}
