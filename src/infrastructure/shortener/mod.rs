//! Shortening service clients.
//!
//! - [`SpooClient`] - HTTP client for spoo.me-compatible shortening APIs

mod spoo_client;

pub use spoo_client::{DEFAULT_BASE_URL, SHORTEN_PATH, SpooClient};
