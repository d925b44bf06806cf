//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Health check (public)
//! - `POST /api/shorten`  - Shorten a URL with fallback (rate limited)
//! - `GET  /api/qr`       - QR code download
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-client fixed window on the shorten endpoint
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

/// Routes and middleware without path normalization.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes(state.clone()))
        .with_state(state)
        .layer(tracing::layer())
}
