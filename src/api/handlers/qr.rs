//! Handler for QR code downloads.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::qr::QrQuery;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_normalizer::normalize_valid;

/// Renders a QR code for `url` and returns it as a file download.
///
/// # Endpoint
///
/// `GET /api/qr?url=<url>&format=svg|png&size=<px>&transparent=<bool>&background=<#hex>`
///
/// # Query Parameters
///
/// - `url` - Payload, normalized like shorten input (required)
/// - `format` - `svg` (default) or `png`
/// - `size` - Edge length in pixels, 1..=5000 (default 512)
/// - `transparent` - Drop the white background (default `false`)
/// - `background` - Opaque PNG background, `#rgb` or `#rrggbb`
///
/// # Response
///
/// The image bytes with `Content-Type` set to `image/svg+xml` or `image/png`
/// and `Content-Disposition: attachment; filename="<derived>.<ext>"`.
///
/// # Errors
///
/// - **400**: Missing or invalid parameters
/// - **500**: Image encoding failure
pub async fn qr_handler(
    State(state): State<AppState>,
    query: Result<Query<QrQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;
    query.validate()?;

    let payload =
        normalize_valid(&query.url).ok_or_else(|| AppError::bad_request("Invalid URL format"))?;
    let options = query.export_options()?;

    let exported = state.qr_service.export(&payload, &options)?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        exported.filename
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(exported.content_type),
            ),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        exported.bytes,
    )
        .into_response())
}
