//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{QrService, ShortenService};
use crate::infrastructure::rate_limit::FixedWindowLimiter;

/// Default ceiling for shorten request bodies, in bytes.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 10 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub qr_service: QrService,
    pub rate_limiter: FixedWindowLimiter,
    /// Ceiling for the shorten request body, checked on the declared length,
    /// the raw body and the re-serialized JSON.
    pub max_request_bytes: usize,
    /// When true, client keys come from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(shorten_service: Arc<ShortenService>, rate_limiter: FixedWindowLimiter) -> Self {
        Self {
            shorten_service,
            qr_service: QrService::new(),
            rate_limiter,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            behind_proxy: false,
        }
    }

    pub fn with_max_request_bytes(mut self, max_request_bytes: usize) -> Self {
        self.max_request_bytes = max_request_bytes;
        self
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}
