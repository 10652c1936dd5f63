use axum::{Json, Router, extract::State, routing::get};
use validator::Validate;

use crate::{
    dto::leaderboard::{ScoreEntry, SubmitScoreRequest, SubmitScoreResponse},
    error::AppError,
    services::leaderboard_service,
    state::SharedState,
};

/// Routes reading and feeding the high-score table.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/leaderboard", get(list_scores).post(submit_score))
}

/// Return the top scores, highest first.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "leaderboard",
    responses((status = 200, description = "Top scores in rank order", body = [ScoreEntry]))
)]
pub async fn list_scores(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ScoreEntry>>, AppError> {
    Ok(Json(leaderboard_service::list_top(&state).await?))
}

/// Record a finished run.
#[utoipa::path(
    post,
    path = "/api/leaderboard",
    tag = "leaderboard",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = SubmitScoreResponse),
        (status = 400, description = "Blank name or negative score")
    )
)]
pub async fn submit_score(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    payload.validate()?;
    let response = leaderboard_service::submit_score(&state, payload).await?;
    Ok(Json(response))
}
