//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file is honoured when present (loaded by `main.rs` via `dotenvy`).
//!
//! ## Shortening
//!
//! ```bash
//! export SHORTENER_API_KEY="your-spoo-me-key"
//! export SHORTENER_BASE_URL="https://spoo.me"
//! ```
//!
//! `SPOO_ME_API_KEY` is accepted as an alias for `SHORTENER_API_KEY`. When no
//! key is set (or it is empty) the service runs in fallback mode and encodes
//! long URLs directly.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SHORTENER_TIMEOUT_SECS` - Outbound request timeout (default: 10)
//! - `RATE_LIMIT_MAX_REQUESTS` - Requests per client per window (default: 10)
//! - `RATE_LIMIT_WINDOW_SECS` - Window length (default: 60)
//! - `RATE_LIMIT_PRUNE_THRESHOLD` - Tracked clients before expired ones are swept (default: 500)
//! - `MAX_REQUEST_BYTES` - Shorten request body ceiling (default: 10240)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-For` / `X-Real-IP` (default: false)

use anyhow::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::shortener::DEFAULT_BASE_URL;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Credential for the shortening service. `None` enables fallback mode.
    pub shortener_api_key: Option<String>,
    pub shortener_base_url: String,
    pub shortener_timeout_secs: u64,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    /// Number of tracked clients above which expired records are pruned.
    pub rate_limit_prune_threshold: usize,
    pub max_request_bytes: usize,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            shortener_api_key: None,
            shortener_base_url: DEFAULT_BASE_URL.to_string(),
            shortener_timeout_secs: 10,
            rate_limit_max_requests: 10,
            rate_limit_window_secs: 60,
            rate_limit_prune_threshold: 500,
            max_request_bytes: 10 * 1024,
            behind_proxy: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, using defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let shortener_api_key = Self::load_api_key();
        let shortener_base_url =
            env::var("SHORTENER_BASE_URL").unwrap_or(defaults.shortener_base_url);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            shortener_api_key,
            shortener_base_url,
            shortener_timeout_secs: parse_var(
                "SHORTENER_TIMEOUT_SECS",
                defaults.shortener_timeout_secs,
            ),
            rate_limit_max_requests: parse_var(
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            ),
            rate_limit_window_secs: parse_var(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            ),
            rate_limit_prune_threshold: parse_var(
                "RATE_LIMIT_PRUNE_THRESHOLD",
                defaults.rate_limit_prune_threshold,
            ),
            max_request_bytes: parse_var("MAX_REQUEST_BYTES", defaults.max_request_bytes),
            behind_proxy,
        })
    }

    /// Loads the shortening credential.
    ///
    /// Priority:
    /// 1. `SHORTENER_API_KEY`
    /// 2. `SPOO_ME_API_KEY`
    ///
    /// Empty or whitespace-only values count as absent.
    fn load_api_key() -> Option<String> {
        ["SHORTENER_API_KEY", "SPOO_ME_API_KEY"]
            .into_iter()
            .filter_map(|name| env::var(name).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `shortener_base_url` is not an http(s) URL
    /// - any timeout, window or limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.shortener_base_url.starts_with("http://")
            && !self.shortener_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "SHORTENER_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.shortener_base_url
            );
        }

        if self.shortener_timeout_secs == 0 {
            anyhow::bail!("SHORTENER_TIMEOUT_SECS must be greater than 0");
        }

        if self.rate_limit_max_requests == 0 {
            anyhow::bail!("RATE_LIMIT_MAX_REQUESTS must be at least 1");
        }

        if self.rate_limit_window_secs == 0 {
            anyhow::bail!("RATE_LIMIT_WINDOW_SECS must be greater than 0");
        }

        if self.max_request_bytes == 0 {
            anyhow::bail!("MAX_REQUEST_BYTES must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether URL shortening is enabled.
    pub fn is_shortener_enabled(&self) -> bool {
        self.shortener_api_key.is_some()
    }

    pub fn shortener_timeout(&self) -> Duration {
        Duration::from_secs(self.shortener_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if let Some(ref key) = self.shortener_api_key {
            tracing::info!(
                "  Shortener: {} (key {})",
                self.shortener_base_url,
                mask_secret(key)
            );
        } else {
            tracing::info!("  Shortener: disabled (fallback mode)");
        }

        tracing::info!(
            "  Rate limit: {} requests / {}s",
            self.rate_limit_max_requests,
            self.rate_limit_window_secs
        );
        tracing::info!("  Max request size: {} bytes", self.max_request_bytes);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Masks a secret for logging, keeping only its last four characters.
///
/// - `sk_live_abcdef1234` → `***1234`
/// - `abc` → `***`
fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();

    if count <= 8 {
        return "***".to_string();
    }

    let tail: String = secret.chars().skip(count - 4).collect();
    format!("***{tail}")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
