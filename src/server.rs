//! HTTP server initialization and runtime setup.
//!
//! Builds the shortening client (or fallback mode), the rate limiter and the
//! Axum server, then serves until a shutdown signal arrives.

use crate::application::services::ShortenService;
use crate::config::Config;
use crate::domain::shortener::UrlShortener;
use crate::infrastructure::rate_limit::FixedWindowLimiter;
use crate::infrastructure::shortener::SpooClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds application state from configuration.
///
/// # Errors
///
/// Returns an error if the shortening HTTP client cannot be constructed.
pub fn build_state(config: &Config) -> Result<AppState> {
    let shortener: Option<Arc<dyn UrlShortener>> = match &config.shortener_api_key {
        Some(key) => {
            let client = SpooClient::new(
                &config.shortener_base_url,
                Some(key.clone()),
                config.shortener_timeout(),
            )
            .context("Failed to build shortening client")?;
            tracing::info!("Shortening enabled via {}", client.endpoint());
            Some(Arc::new(client))
        }
        None => {
            tracing::info!("Shortening disabled, long URLs will be encoded directly");
            None
        }
    };

    let rate_limiter = FixedWindowLimiter::new(
        config.rate_limit_max_requests,
        config.rate_limit_window(),
        config.rate_limit_prune_threshold,
    );

    Ok(
        AppState::new(Arc::new(ShortenService::new(shortener)), rate_limiter)
            .with_max_request_bytes(config.max_request_bytes)
            .with_behind_proxy(config.behind_proxy),
    )
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The shortening client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    tracing::info!("Shutdown signal received");
}
