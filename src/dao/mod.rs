/// Durable backends for the leaderboard.
pub mod score_store;
/// Storage error types shared by every backend.
pub mod storage;
