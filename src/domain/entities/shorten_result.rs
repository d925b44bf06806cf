//! Outcome of a shorten request.

/// The URL pair handed to the QR renderer.
///
/// Constructed only through [`ShortenResult::shortened`] or
/// [`ShortenResult::fallback`], so [`ShortenResult::qr_url`] is always the short
/// URL when shortening succeeded and the long URL otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    long_url: String,
    short_url: Option<String>,
    warning: Option<String>,
}

impl ShortenResult {
    /// Shortening succeeded; the short URL becomes the QR payload.
    pub fn shortened(long_url: String, short_url: String) -> Self {
        Self {
            long_url,
            short_url: Some(short_url),
            warning: None,
        }
    }

    /// Shortening was skipped or failed; the long URL becomes the QR payload.
    pub fn fallback(long_url: String, warning: Option<String>) -> Self {
        Self {
            long_url,
            short_url: None,
            warning,
        }
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    pub fn short_url(&self) -> Option<&str> {
        self.short_url.as_deref()
    }

    /// The exact string to encode into the QR code.
    pub fn qr_url(&self) -> &str {
        self.short_url.as_deref().unwrap_or(&self.long_url)
    }

    pub fn was_shortened(&self) -> bool {
        self.short_url.is_some()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortened_uses_short_url() {
        let result = ShortenResult::shortened(
            "https://example.com/very/long".to_string(),
            "https://spoo.me/abc".to_string(),
        );

        assert!(result.was_shortened());
        assert_eq!(result.qr_url(), "https://spoo.me/abc");
        assert_eq!(result.short_url(), Some("https://spoo.me/abc"));
        assert_eq!(result.long_url(), "https://example.com/very/long");
        assert!(result.warning().is_none());
    }

    #[test]
    fn test_fallback_uses_long_url() {
        let result = ShortenResult::fallback(
            "https://example.com".to_string(),
            Some("Shortening service is unavailable".to_string()),
        );

        assert!(!result.was_shortened());
        assert_eq!(result.qr_url(), "https://example.com");
        assert!(result.short_url().is_none());
        assert_eq!(result.warning(), Some("Shortening service is unavailable"));
    }

    #[test]
    fn test_fallback_without_warning() {
        let result = ShortenResult::fallback("https://example.com".to_string(), None);

        assert_eq!(result.qr_url(), result.long_url());
        assert!(result.warning().is_none());
    }
}
