//! # QR Shortlink
//!
//! Turns a URL into a downloadable QR code, shortening it first through a
//! third-party service when one is configured.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Shorten results, the shortener contract and its failure policy
//! - **Application Layer** ([`application`]) - Shorten orchestration and QR export services
//! - **Infrastructure Layer** ([`infrastructure`]) - Rate limiting and the spoo.me HTTP client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//! - **QR** ([`qr`]) - Matrix rendering and PNG/SVG export
//! - **Client** ([`client`]) - Retrying HTTP client for the shorten endpoint
//!
//! ## Features
//!
//! - Best-effort shortening with transparent fallback to the long URL
//! - Per-client fixed-window rate limiting
//! - PNG (1-5000 px) and SVG export with optional transparent background
//! - Filesystem-safe download names derived from the encoded URL
//!
//! ## Quick Start
//!
//! ```bash
//! export SHORTENER_API_KEY="..."   # Optional, enables shortening
//! cargo run
//!
//! # Offline CLI
//! cargo run --bin qrgen -- example.com --format both
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod qr;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ExportedQr, QrService, ShortenService};
    pub use crate::domain::entities::{ShortenResult, ShortenedUrl};
    pub use crate::domain::shortener::{ShortenerError, UrlShortener};
    pub use crate::error::AppError;
    pub use crate::infrastructure::rate_limit::FixedWindowLimiter;
    pub use crate::qr::{ExportFormat, ExportOptions};
    pub use crate::state::AppState;
}
