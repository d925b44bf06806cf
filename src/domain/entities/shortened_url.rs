//! Short link record returned by the shortening service.

use serde::Deserialize;
use serde_json::Number;

/// Response body of a successful `POST /api/v1/shorten` call upstream.
///
/// Only `short_url` is required; the remaining fields are informational and
/// default when the service omits them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShortenedUrl {
    pub short_url: String,

    #[serde(default)]
    pub alias: String,

    #[serde(default)]
    pub long_url: String,

    #[serde(default)]
    pub owner_id: Option<String>,

    /// Creation time in Unix seconds, integral or fractional.
    #[serde(default)]
    pub created_at: Option<Number>,

    #[serde(default)]
    pub status: Option<LinkStatus>,

    #[serde(default)]
    pub private_stats: bool,
}

/// Lifecycle status reported for a short link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkStatus {
    Active,
    Inactive,
}

impl ShortenedUrl {
    /// Creates a record carrying only the URLs.
    pub fn new(long_url: impl Into<String>, short_url: impl Into<String>) -> Self {
        Self {
            short_url: short_url.into(),
            alias: String::new(),
            long_url: long_url.into(),
            owner_id: None,
            created_at: None,
            status: None,
            private_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let json = r#"{
            "alias": "abc",
            "short_url": "https://spoo.me/abc",
            "long_url": "https://example.com",
            "owner_id": null,
            "created_at": 1735689600,
            "status": "ACTIVE",
            "private_stats": false
        }"#;

        let parsed: ShortenedUrl = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.alias, "abc");
        assert_eq!(parsed.short_url, "https://spoo.me/abc");
        assert_eq!(parsed.status, Some(LinkStatus::Active));
        assert_eq!(parsed.created_at.and_then(|n| n.as_i64()), Some(1735689600));
    }

    #[test]
    fn test_deserialize_fractional_created_at() {
        let parsed: ShortenedUrl = serde_json::from_str(
            r#"{"short_url": "https://spoo.me/abc", "created_at": 1735689600.123}"#,
        )
        .unwrap();

        assert_eq!(parsed.short_url, "https://spoo.me/abc");
        assert_eq!(
            parsed.created_at.and_then(|n| n.as_f64()),
            Some(1735689600.123)
        );
    }

    #[test]
    fn test_deserialize_minimal_response() {
        let parsed: ShortenedUrl =
            serde_json::from_str(r#"{"short_url": "https://spoo.me/x"}"#).unwrap();

        assert_eq!(parsed, ShortenedUrl::new("", "https://spoo.me/x"));
    }

    #[test]
    fn test_deserialize_missing_short_url_fails() {
        let parsed = serde_json::from_str::<ShortenedUrl>(r#"{"alias": "abc"}"#);
        assert!(parsed.is_err());
    }
}
