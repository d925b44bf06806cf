//! URL normalization and validation for user-supplied links.
//!
//! Users often paste bare hostnames (`example.com/page`). Normalization adds a
//! default `https://` scheme so the value can be parsed and encoded, without
//! otherwise rewriting what the user typed.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches an explicit `http://` or `https://` prefix, in any letter case.
static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme regex is valid"));

/// Scheme prepended to input that does not carry one.
pub const DEFAULT_SCHEME: &str = "https://";

/// Normalizes raw user input into a URL with an explicit scheme.
///
/// # Rules
///
/// 1. Leading and trailing whitespace is trimmed
/// 2. Empty input stays empty
/// 3. Input starting with `http://` or `https://` (case-insensitive) is returned as-is
/// 4. Anything else gets `https://` prepended
///
/// Normalization is idempotent: `normalize(&normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("example.com"), "https://example.com");
/// assert_eq!(normalize("  HTTP://Example.com  "), "HTTP://Example.com");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.is_empty() || SCHEME_REGEX.is_match(trimmed) {
        return trimmed.to_string();
    }

    format!("{DEFAULT_SCHEME}{trimmed}")
}

/// Returns `true` if `url` parses as a well-formed absolute URL.
///
/// Performs no network access and applies no scheme allow-list beyond what
/// the parser itself enforces.
pub fn is_valid(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Normalizes and validates in one step.
///
/// Returns `None` when the normalized value is empty or fails to parse.
pub fn normalize_valid(raw: &str) -> Option<String> {
    let normalized = normalize(raw);

    if normalized.is_empty() || !is_valid(&normalized) {
        return None;
    }

    Some(normalized)
}
