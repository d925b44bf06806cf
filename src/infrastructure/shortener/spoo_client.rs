//! HTTP client for the spoo.me shortening API.

use crate::domain::{
    entities::ShortenedUrl,
    shortener::{ShortenerError, UrlShortener},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Public spoo.me endpoint.
pub const DEFAULT_BASE_URL: &str = "https://spoo.me";

/// Path of the shorten operation, relative to the base URL.
pub const SHORTEN_PATH: &str = "/api/v1/shorten";

const FALLBACK_MESSAGE: &str = "Failed to shorten URL";

#[derive(Serialize)]
struct ShortenPayload<'a> {
    long_url: &'a str,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

/// Shortens URLs through a spoo.me-compatible API.
///
/// One call performs exactly one HTTP request. The API key, when present, is
/// sent as a bearer token.
#[derive(Clone)]
pub struct SpooClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl SpooClient {
    /// Creates a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Unexpected`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ShortenerError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("qr-shortlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ShortenerError::Unexpected(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SHORTEN_PATH),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_transport_error(err: reqwest::Error) -> ShortenerError {
        if err.is_timeout() {
            ShortenerError::Timeout
        } else if err.is_builder() {
            ShortenerError::Unexpected(err.to_string())
        } else {
            ShortenerError::Network(err.to_string())
        }
    }
}

/// User-facing message for a non-2xx upstream status.
///
/// Well-known statuses get a fixed message; anything else uses the upstream
/// `message` field, then the status reason phrase.
pub(crate) fn upstream_message(status: StatusCode, body: &str) -> String {
    match status.as_u16() {
        400 => "The shortening service rejected the URL".to_string(),
        401 => "Invalid or missing shortening service API key".to_string(),
        403 => "Access to the shortening service was denied".to_string(),
        429 => "Shortening service rate limit exceeded".to_string(),
        500..=599 => "Shortening service is temporarily unavailable".to_string(),
        _ => serde_json::from_str::<UpstreamErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
    }
}

#[async_trait]
impl UrlShortener for SpooClient {
    async fn shorten(&self, long_url: &str) -> Result<ShortenedUrl, ShortenerError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&ShortenPayload { long_url });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(Self::map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(Self::map_transport_error)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Shortening service returned an error");
            return Err(ShortenerError::Upstream {
                status: status.as_u16(),
                message: upstream_message(status, &body),
            });
        }

        let shortened: ShortenedUrl = serde_json::from_str(&body)
            .map_err(|e| ShortenerError::InvalidResponse(e.to_string()))?;

        debug!(short_url = %shortened.short_url, "URL shortened");

        Ok(shortened)
    }
}
