//! Library crate for rival-snake-back, exposing modules for binaries and integration tests.

/// Startup configuration.
pub mod config;
/// Persistence backends.
pub mod dao;
mod dto;
mod error;
/// HTTP route trees.
pub mod routes;
/// Services called by the route handlers.
pub mod services;
/// Shared application state and the leaderboard domain.
pub mod state;
