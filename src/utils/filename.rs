//! Download filename derivation for exported QR codes.

use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;

/// Default maximum length of a derived filename stem, in characters.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 200;

static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme regex is valid"));

/// Characters that are unsafe in filenames on at least one common platform.
static UNSAFE_CHARS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[/:?#&=%<>|"'\\*~`{}\[\]]"#).expect("unsafe chars regex is valid")
});

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static HYPHEN_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("hyphen regex is valid"));

/// Converts a URL into a filesystem-safe filename stem.
///
/// # Rules
///
/// 1. The `http://` / `https://` scheme is stripped
/// 2. Unsafe characters and whitespace runs become hyphens
/// 3. Consecutive hyphens collapse into one
/// 4. Leading and trailing hyphens are trimmed
/// 5. The result is capped at `max_len` characters (re-trimming a trailing hyphen)
///
/// Returns an empty string when nothing usable remains.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(url_to_filename("https://example.com/a?b=1", 200), "example.com-a-b-1");
/// ```
pub fn url_to_filename(url: &str, max_len: usize) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let without_scheme = SCHEME_REGEX.replace(trimmed, "");
    let replaced = UNSAFE_CHARS_REGEX.replace_all(&without_scheme, "-");
    let replaced = WHITESPACE_REGEX.replace_all(&replaced, "-");
    let collapsed = HYPHEN_RUN_REGEX.replace_all(&replaced, "-");
    let mut filename = collapsed.trim_matches('-').to_string();

    if filename.chars().count() > max_len {
        filename = filename.chars().take(max_len).collect();
        filename.truncate(filename.trim_end_matches('-').len());
    }

    filename
}

/// Builds a complete download filename with extension for a URL.
///
/// Falls back to `qr-code-<unix millis>` when the URL yields an empty stem.
pub fn export_filename(url: &str, extension: &str) -> String {
    let stem = url_to_filename(url, DEFAULT_MAX_FILENAME_LEN);

    if stem.is_empty() {
        format!("qr-code-{}.{extension}", Utc::now().timestamp_millis())
    } else {
        format!("{stem}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_to_filename_basic() {
        assert_eq!(
            url_to_filename("https://example.com/a?b=1", DEFAULT_MAX_FILENAME_LEN),
            "example.com-a-b-1"
        );
    }

    #[test]
    fn test_url_to_filename_http_and_case() {
        assert_eq!(
            url_to_filename("HTTP://Example.com/Path", DEFAULT_MAX_FILENAME_LEN),
            "Example.com-Path"
        );
    }

    #[test]
    fn test_url_to_filename_collapses_and_trims() {
        assert_eq!(
            url_to_filename("https://example.com//a//b/?x=&y=#", DEFAULT_MAX_FILENAME_LEN),
            "example.com-a-b-x-y"
        );
    }

    #[test]
    fn test_url_to_filename_replaces_whitespace() {
        assert_eq!(
            url_to_filename("example.com/my  page\tname", DEFAULT_MAX_FILENAME_LEN),
            "example.com-my-page-name"
        );
    }

    #[test]
    fn test_url_to_filename_all_unsafe_chars() {
        assert_eq!(
            url_to_filename(r#"a/b:c?d#e&f=g%h<i>j|k"l'm\n*o~p`q{r}s[t]u"#, 200),
            "a-b-c-d-e-f-g-h-i-j-k-l-m-n-o-p-q-r-s-t-u"
        );
    }

    #[test]
    fn test_url_to_filename_empty() {
        assert_eq!(url_to_filename("", DEFAULT_MAX_FILENAME_LEN), "");
        assert_eq!(url_to_filename("   ", DEFAULT_MAX_FILENAME_LEN), "");
        assert_eq!(url_to_filename("https://", DEFAULT_MAX_FILENAME_LEN), "");
        assert_eq!(url_to_filename("https://???", DEFAULT_MAX_FILENAME_LEN), "");
    }

    #[test]
    fn test_url_to_filename_caps_length() {
        let url = format!("https://example.com/{}", "a".repeat(500));
        let name = url_to_filename(&url, DEFAULT_MAX_FILENAME_LEN);
        assert_eq!(name.chars().count(), DEFAULT_MAX_FILENAME_LEN);
    }

    #[test]
    fn test_url_to_filename_cap_drops_trailing_hyphen() {
        assert_eq!(url_to_filename("https://abcd/efgh", 5), "abcd");
    }

    #[test]
    fn test_export_filename_with_stem() {
        assert_eq!(
            export_filename("https://example.com/a?b=1", "png"),
            "example.com-a-b-1.png"
        );
    }

    #[test]
    fn test_export_filename_fallback() {
        let name = export_filename("https://", "svg");
        assert!(name.starts_with("qr-code-"));
        assert!(name.ends_with(".svg"));
    }
}
