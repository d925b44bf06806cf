//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortenResult;

/// Request to shorten a single URL.
///
/// `longUrl` is the current field name; `long_url` is still accepted from
/// older clients. When both are present, `longUrl` wins.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    #[serde(rename = "longUrl", default)]
    pub long_url: Option<String>,

    #[serde(rename = "long_url", default)]
    pub legacy_long_url: Option<String>,
}

impl ShortenRequest {
    /// The submitted URL, if any field carried a non-blank string.
    ///
    /// A blank `longUrl` falls through to `long_url`.
    pub fn url(&self) -> Option<&str> {
        let non_blank = |u: &&str| !u.trim().is_empty();

        self.long_url
            .as_deref()
            .filter(non_blank)
            .or(self.legacy_long_url.as_deref().filter(non_blank))
    }
}

/// Shorten outcome, including fallback mode.
///
/// `qrUrl` is the exact string to encode: the short URL when `wasShortened`,
/// the normalized long URL otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub long_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,

    pub qr_url: String,

    pub was_shortened: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<ShortenResult> for ShortenResponse {
    fn from(result: ShortenResult) -> Self {
        Self {
            long_url: result.long_url().to_string(),
            short_url: result.short_url().map(str::to_string),
            qr_url: result.qr_url().to_string(),
            was_shortened: result.was_shortened(),
            warning: result.warning().map(str::to_string),
        }
    }
}
