//! Handler for the shorten endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

const LONG_URL_REQUIRED: &str = "longUrl is required and must be a string";

/// Shortens a URL for QR encoding, falling back to the long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "example.com/some/page" }
/// ```
///
/// The legacy field name `long_url` is also accepted.
///
/// # Response
///
/// ```json
/// {
///   "longUrl": "https://example.com/some/page",
///   "shortUrl": "https://spoo.me/abc123",
///   "qrUrl": "https://spoo.me/abc123",
///   "wasShortened": true
/// }
/// ```
///
/// When shortening is disabled or the shortening service fails, `shortUrl` is
/// omitted, `qrUrl` equals `longUrl` and a failure carries a `warning`.
///
/// # Errors
///
/// - **400**: Malformed JSON, missing or invalid URL
/// - **413**: Declared length, raw body or re-serialized body over the limit.
///   The route carries a `DefaultBodyLimit` of the same size, so an oversized
///   body is refused while buffering instead of being read in full.
/// - **429**: Client exceeded the rate limit (see [`crate::api::middleware::rate_limit`])
/// - **500**: Unexpected shortening failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let max = state.max_request_bytes;

    if declared_length(&headers).is_some_and(|len| len > max) {
        return Err(AppError::payload_too_large("Request too large"));
    }

    let body = body.map_err(body_rejection)?;

    let value: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::bad_request("Request body must be valid JSON"))?;

    let reserialized_len = serde_json::to_vec(&value)
        .map(|v| v.len())
        .map_err(|_| AppError::bad_request("Request body must be valid JSON"))?;

    if reserialized_len > max {
        return Err(AppError::payload_too_large("Request body too large"));
    }

    if !value.is_object() {
        return Err(AppError::bad_request(LONG_URL_REQUIRED));
    }

    let request: ShortenRequest =
        serde_json::from_value(value).map_err(|_| AppError::bad_request(LONG_URL_REQUIRED))?;

    let url = request
        .url()
        .ok_or_else(|| AppError::bad_request(LONG_URL_REQUIRED))?;

    let result = state.shorten_service.shorten(url).await?;

    Ok(Json(result.into()))
}

/// Maps a failed body read to the JSON error shape.
fn body_rejection(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Request too large")
    } else {
        AppError::bad_request("Failed to read request body")
    }
}

/// Value of the `Content-Length` header, if present and numeric.
fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
