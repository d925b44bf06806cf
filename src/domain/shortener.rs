//! Shortening service contract.

use crate::domain::entities::ShortenedUrl;
use async_trait::async_trait;

/// Typed failure of a call to the shortening service.
///
/// Each variant maps to an HTTP-like status code via
/// [`ShortenerError::status_code`]. The `Display` text is human-readable and
/// safe to show to end users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortenerError {
    #[error("Request to the shortening service timed out")]
    Timeout,

    /// Transport failure. The detail is for logs only.
    #[error("Shortening service is unavailable")]
    Network(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Shortening service returned an invalid response")]
    InvalidResponse(String),

    #[error("Unexpected shortening failure: {0}")]
    Unexpected(String),
}

impl ShortenerError {
    /// HTTP-like status code describing the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ShortenerError::Timeout => 408,
            ShortenerError::Network(_) => 503,
            ShortenerError::Upstream { status, .. } => *status,
            ShortenerError::InvalidResponse(_) => 502,
            ShortenerError::Unexpected(_) => 500,
        }
    }
}

/// Client for an external URL shortening service.
///
/// Implementations perform a single attempt per call; retrying is left to
/// callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::shortener::SpooClient`] - HTTP client for spoo.me-compatible APIs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlShortener: Send + Sync {
    /// Shortens `long_url`, returning the record created upstream.
    ///
    /// # Errors
    ///
    /// Returns a [`ShortenerError`] for transport failures, timeouts, non-2xx
    /// responses and malformed response bodies.
    async fn shorten(&self, long_url: &str) -> Result<ShortenedUrl, ShortenerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ShortenerError::Timeout.status_code(), 408);
        assert_eq!(ShortenerError::Network("refused".into()).status_code(), 503);
        assert_eq!(
            ShortenerError::Upstream {
                status: 429,
                message: "slow down".into()
            }
            .status_code(),
            429
        );
        assert_eq!(
            ShortenerError::InvalidResponse("eof".into()).status_code(),
            502
        );
        assert_eq!(ShortenerError::Unexpected("bug".into()).status_code(), 500);
    }

    #[test]
    fn test_network_detail_not_displayed() {
        let err = ShortenerError::Network("tcp connect error: 10.0.0.1:443".into());
        assert_eq!(err.to_string(), "Shortening service is unavailable");
    }
}
