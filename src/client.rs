//! HTTP client for the shorten endpoint with retries on server errors.
//!
//! Used by the `qrgen` CLI and by anything else that talks to a running
//! instance. Only 5xx responses are retried; client errors, timeouts and
//! transport failures are returned immediately.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio_retry::RetryIf;

use crate::api::dto::shorten::ShortenResponse;

/// Per-attempt timeout.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15);

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: usize = 2;

/// Backoff unit; the n-th retry waits `n × step`.
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Only server-side failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if (500..600).contains(status))
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Linear backoff: `step`, `2 × step`, … for `retries` attempts.
pub fn linear_backoff(step: Duration, retries: usize) -> impl Iterator<Item = Duration> {
    (1..=retries as u32).map(move |n| step * n)
}

/// Client for `POST /api/shorten` on a running server.
///
/// # Example
///
/// ```rust,ignore
/// let client = ShortenApiClient::new("http://localhost:3000")?;
/// let response = client.shorten("example.com/page").await?;
/// println!("encode {}", response.qr_url);
/// ```
#[derive(Clone)]
pub struct ShortenApiClient {
    http: Client,
    endpoint: String,
    max_retries: usize,
    backoff_step: Duration,
}

impl ShortenApiClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(ATTEMPT_TIMEOUT)
            .user_agent(concat!("qrgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::from_reqwest)?;

        Ok(Self {
            http,
            endpoint: format!("{}/api/shorten", base_url.trim_end_matches('/')),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_step: DEFAULT_BACKOFF_STEP,
        })
    }

    /// Overrides the retry count and backoff step.
    pub fn with_retry_policy(mut self, max_retries: usize, backoff_step: Duration) -> Self {
        self.max_retries = max_retries;
        self.backoff_step = backoff_step;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submits `long_url`, retrying 5xx responses with linear backoff.
    ///
    /// # Errors
    ///
    /// Returns the last [`ClientError`] once retries are exhausted, or the
    /// first non-retryable one.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenResponse, ClientError> {
        let mut attempt = 0usize;

        RetryIf::spawn(
            linear_backoff(self.backoff_step, self.max_retries),
            || {
                attempt += 1;
                let current = attempt;
                async move {
                    let result = self.attempt(long_url).await;
                    if let Err(ref e) = result
                        && e.is_retryable()
                    {
                        tracing::warn!(attempt = current, error = %e, "Shorten request failed");
                    }
                    result
                }
            },
            ClientError::is_retryable,
        )
        .await
    }

    async fn attempt(&self, long_url: &str) -> Result<ShortenResponse, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "longUrl": long_url }))
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_reqwest)?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .ok()
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string())
}
