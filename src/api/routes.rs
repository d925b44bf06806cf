//! API route configuration.
//!
//! The shorten endpoint is rate limited per client via
//! [`crate::api::middleware::rate_limit`] and its body is capped at
//! [`AppState::max_request_bytes`].

use crate::api::handlers::{qr_handler, shorten_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Shorten a URL for QR encoding (rate limited)
/// - `GET  /qr`      - Download a QR code as SVG or PNG
pub fn api_routes(state: AppState) -> Router<AppState> {
    let body_limit = DefaultBodyLimit::max(state.max_request_bytes);

    let limited = Router::new()
        .route("/shorten", post(shorten_handler).layer(body_limit))
        .route_layer(middleware::from_fn_with_state(state, rate_limit::layer));

    Router::new().merge(limited).route("/qr", get(qr_handler))
}
