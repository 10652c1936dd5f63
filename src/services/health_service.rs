use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the leaderboard file is in sync with memory.
pub fn health_status(state: &SharedState) -> HealthResponse {
    let leaderboard = state.leaderboard();
    let entries = leaderboard.len();

    if leaderboard.is_degraded() {
        warn!("leaderboard file out of date (degraded mode)");
        HealthResponse::degraded(entries)
    } else {
        HealthResponse::ok(entries)
    }
}
