use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Number of records currently on the leaderboard.
    pub entries: usize,
}

impl HealthResponse {
    /// Create a health response indicating the leaderboard is persisted.
    pub fn ok(entries: usize) -> Self {
        Self {
            status: "ok".to_string(),
            entries,
        }
    }

    /// Create a health response indicating the last write to disk failed.
    pub fn degraded(entries: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            entries,
        }
    }
}
