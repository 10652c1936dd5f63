use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        format_epoch_millis,
        validation::{validate_player_name, validate_score},
    },
    state::{leaderboard::SubmitOutcome, score::ScoreRecord},
};

/// Payload posted by the game client when a run ends.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    /// Player name; trimmed and cut to 20 characters when recorded.
    #[serde(default)]
    pub name: Option<String>,
    /// Final score of the run; a missing or `null` score counts as 0.
    #[serde(default)]
    pub score: Option<i32>,
}

impl SubmitScoreRequest {
    /// Score with the client's missing/`null` value resolved to 0.
    pub fn score_or_zero(&self) -> i32 {
        self.score.unwrap_or(0)
    }
}

impl Validate for SubmitScoreRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_player_name(self.name.as_deref().unwrap_or_default()) {
            errors.add("name", e);
        }

        if let Err(e) = validate_score(self.score_or_zero()) {
            errors.add("score", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreEntry {
    /// Recorded (trimmed, truncated) player name.
    pub name: String,
    /// Points scored in the run.
    pub score: i32,
    /// Submission time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Submission time formatted as RFC 3339.
    pub submitted_at: String,
}

impl From<ScoreRecord> for ScoreEntry {
    fn from(record: ScoreRecord) -> Self {
        Self {
            name: record.name().to_owned(),
            score: record.score(),
            timestamp: record.timestamp(),
            submitted_at: format_epoch_millis(record.timestamp()),
        }
    }
}

/// Acknowledgement returned once a score has been recorded.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    /// Always true; rejected submissions answer with an error body instead.
    pub success: bool,
    /// 1-based leaderboard position, absent when the score did not make the top list.
    pub rank: Option<usize>,
    /// False when the leaderboard could not be written to disk.
    pub persisted: bool,
}

impl From<SubmitOutcome> for SubmitScoreResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        Self {
            success: true,
            rank: outcome.rank,
            persisted: outcome.persisted,
        }
    }
}
