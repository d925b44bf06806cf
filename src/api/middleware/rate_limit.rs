//! Per-client fixed-window rate limiting middleware.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

use crate::{error::AppError, state::AppState, utils::client_ip::client_key};

/// Message returned with `429 Too Many Requests`.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Rejects requests from clients that used up their window.
///
/// # Key Extraction
///
/// The client key is the peer socket address, or the first
/// `X-Forwarded-For` entry / `X-Real-IP` when [`AppState::behind_proxy`] is set.
/// See [`client_key`].
///
/// # Errors
///
/// Returns `429 Too Many Requests` with `{"error": "..."}` once the client
/// exceeds the configured number of requests in the current window.
///
/// # Example
///
/// ```rust,ignore
/// let shorten = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let key = client_key(req.headers(), peer, st.behind_proxy);

    if !st.rate_limiter.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return Err(AppError::rate_limited(RATE_LIMIT_MESSAGE));
    }

    Ok(next.run(req).await)
}
