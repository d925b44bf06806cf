//! Shorten orchestration: normalize, shorten, fall back.

use std::sync::Arc;

use crate::domain::entities::ShortenResult;
use crate::domain::failure_policy::{FailureAction, action_for};
use crate::domain::shortener::UrlShortener;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_valid;
use tracing::{error, info, warn};

/// Turns a user-supplied URL into the pair used for QR generation.
///
/// The shortener is optional. Without one the service runs in fallback mode
/// and always encodes the normalized long URL.
pub struct ShortenService {
    shortener: Option<Arc<dyn UrlShortener>>,
}

impl ShortenService {
    pub fn new(shortener: Option<Arc<dyn UrlShortener>>) -> Self {
        Self { shortener }
    }

    /// A service that never calls a shortening backend.
    pub fn fallback_only() -> Self {
        Self { shortener: None }
    }

    /// Returns `true` when a shortening backend is configured.
    pub fn is_enabled(&self) -> bool {
        self.shortener.is_some()
    }

    /// Normalizes `raw_url` and tries to shorten it.
    ///
    /// Upstream failures are not errors here: the result falls back to the
    /// long URL and carries the failure message as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or invalid after
    /// normalization.
    /// Returns [`AppError::Internal`] if the shortener fails unexpectedly.
    pub async fn shorten(&self, raw_url: &str) -> Result<ShortenResult, AppError> {
        let long_url =
            normalize_valid(raw_url).ok_or_else(|| AppError::bad_request("Invalid URL format"))?;

        let Some(shortener) = &self.shortener else {
            return Ok(ShortenResult::fallback(long_url, None));
        };

        match shortener.shorten(&long_url).await {
            Ok(shortened) => {
                info!(long_url = %long_url, short_url = %shortened.short_url, "URL shortened");
                Ok(ShortenResult::shortened(long_url, shortened.short_url))
            }
            Err(err) => match action_for(&err) {
                FailureAction::Fallback => {
                    warn!(
                        status = err.status_code(),
                        error = ?err,
                        "Shortening failed, using long URL"
                    );
                    Ok(ShortenResult::fallback(long_url, Some(err.to_string())))
                }
                FailureAction::Fail => {
                    error!(error = ?err, "Unexpected shortening failure");
                    Err(AppError::internal("Internal server error"))
                }
            },
        }
    }
}
