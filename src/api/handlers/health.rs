//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Always. The service has no hard dependencies; without a
///   shortening service it keeps working in fallback mode.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "shortener": { "status": "ok" },
///     "rate_limiter": { "status": "ok", "message": "Tracking 3 clients, 10 requests / 60s" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            shortener: check_shortener(&state),
            rate_limiter: check_rate_limiter(&state),
        },
    })
}

fn check_shortener(state: &AppState) -> CheckStatus {
    if state.shorten_service.is_enabled() {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "disabled".to_string(),
            message: Some("No API key configured, long URLs are encoded directly".to_string()),
        }
    }
}

fn check_rate_limiter(state: &AppState) -> CheckStatus {
    let limiter = &state.rate_limiter;

    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!(
            "Tracking {} clients, {} requests / {}s",
            limiter.len(),
            limiter.max_requests(),
            limiter.window().as_secs()
        )),
    }
}
