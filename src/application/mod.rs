//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations: URL normalization, the
//! shortening call and its failure policy, and QR export. Handlers and the CLI
//! call into these services instead of the lower layers directly.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Shortening with fallback to the long URL
//! - [`services::qr_service::QrService`] - QR rendering and download naming

pub mod services;
