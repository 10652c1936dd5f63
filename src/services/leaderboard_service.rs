//! Bridges HTTP handlers to the blocking leaderboard operations.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::task;
use tracing::{error, info};

use crate::{
    dto::leaderboard::{ScoreEntry, SubmitScoreRequest, SubmitScoreResponse},
    error::ServiceError,
    state::{SharedState, score::ScoreRecord},
};

/// Return the current top scores, highest first.
pub async fn list_top(state: &SharedState) -> Result<Vec<ScoreEntry>, ServiceError> {
    let state = Arc::clone(state);
    let records = task::spawn_blocking(move || state.leaderboard().list_top())
        .await
        .map_err(join_error)?;

    Ok(records.into_iter().map(ScoreEntry::from).collect())
}

/// Stamp the submission with the server clock and rank it.
pub async fn submit_score(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<SubmitScoreResponse, ServiceError> {
    let score = request.score_or_zero();
    let record = ScoreRecord::new(request.name.unwrap_or_default(), score, now_millis());

    let state = Arc::clone(state);
    let outcome = task::spawn_blocking(move || state.leaderboard().submit(record))
        .await
        .map_err(join_error)??;

    info!(
        rank = ?outcome.rank,
        persisted = outcome.persisted,
        "recorded score"
    );
    Ok(outcome.into())
}

fn now_millis() -> i64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(millis).unwrap_or(i64::MAX)
}

fn join_error(err: task::JoinError) -> ServiceError {
    error!(error = %err, "leaderboard task failed");
    ServiceError::Internal("leaderboard task failed".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::score_store::JsonFileScoreStore,
        state::{AppState, leaderboard::Leaderboard},
    };
    use tempfile::TempDir;

    fn state(dir: &TempDir) -> SharedState {
        let store = JsonFileScoreStore::new(dir.path().join("leaderboard.json"));
        AppState::new(Leaderboard::load(Arc::new(store)))
    }

    fn request(name: &str, score: i32) -> SubmitScoreRequest {
        SubmitScoreRequest {
            name: Some(name.into()),
            score: Some(score),
        }
    }

    #[tokio::test]
    async fn submitted_score_is_listed_with_server_timestamp() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        let before = now_millis();

        let response = submit_score(&state, request("Ann", 42)).await.unwrap();
        assert!(response.success);
        assert_eq!(response.rank, Some(1));
        assert!(response.persisted);

        let top = list_top(&state).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Ann");
        assert_eq!(top[0].score, 42);
        assert!(top[0].timestamp >= before);
    }

    #[tokio::test]
    async fn blank_name_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let err = submit_score(&state, request("  ", 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m == "Name is required"));
        assert!(list_top(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_score_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let err = submit_score(&state, request("Ann", -1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m == "Invalid score"));
    }

    #[tokio::test]
    async fn concurrent_submissions_are_all_ranked() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let mut tasks = task::JoinSet::new();
        for i in 0..20 {
            let state = state.clone();
            tasks.spawn(async move { submit_score(&state, request(&format!("p{i}"), i)).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let scores: Vec<i32> = list_top(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.score)
            .collect();
        assert_eq!(scores, (10..20).rev().collect::<Vec<_>>());
    }
}
