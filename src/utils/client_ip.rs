//! Client identification for per-client rate limiting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Key used when no client address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Derives the rate-limit key for a request.
///
/// # Resolution Order
///
/// When `behind_proxy` is `true`:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. Peer socket address
///
/// When `behind_proxy` is `false`, proxy headers are ignored because any
/// client could forge them; only the peer address is used.
///
/// Falls back to [`UNKNOWN_CLIENT`] when nothing is available.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_key(&headers, None, true), "203.0.113.7");
/// assert_eq!(client_key(&headers, None, false), "unknown");
/// ```
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> String {
    if behind_proxy && let Some(ip) = forwarded_ip(headers) {
        return ip;
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Reads the client IP from proxy headers, if present and non-empty.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(forwarded) = header_value(X_FORWARDED_FOR) {
        let first = forwarded.split(',').next().unwrap_or(forwarded).trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    header_value(X_REAL_IP).map(str::to_string)
}
