/// Ranked top-N store synchronized with disk.
pub mod leaderboard;
/// Score record value and its validation predicates.
pub mod score;

use std::sync::Arc;

use self::leaderboard::Leaderboard;

/// Handle to [`AppState`] cloned into every router.
pub type SharedState = Arc<AppState>;

/// Central application state handed to every request handler.
pub struct AppState {
    leaderboard: Leaderboard,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(leaderboard: Leaderboard) -> SharedState {
        Arc::new(Self { leaderboard })
    }

    /// The process-wide leaderboard.
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }
}
