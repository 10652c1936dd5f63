use axum::Router;

use crate::state::SharedState;

/// Swagger UI routes.
pub mod docs;
/// Health check routes.
pub mod health;
/// Leaderboard listing and submission routes.
pub mod leaderboard;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router().merge(leaderboard::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
