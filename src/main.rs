//! Rival Snake Back binary entrypoint wiring the leaderboard, REST routes and the game client.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rival_snake_back::{
    config::AppConfig,
    dao::score_store::JsonFileScoreStore,
    routes,
    state::{AppState, SharedState, leaderboard::Leaderboard},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();

    let store = JsonFileScoreStore::new(&config.leaderboard_path);
    info!(path = %store.path().display(), "using leaderboard file");
    let leaderboard = Leaderboard::load(Arc::new(store));
    let app_state = AppState::new(leaderboard);

    let app = build_router(app_state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "Rival Snake running");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router, serve the game client for unmatched paths and attach
/// cross-cutting middleware layers.
fn build_router(state: SharedState, config: &AppConfig) -> Router<()> {
    routes::router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
