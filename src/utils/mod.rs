//! Utility functions for URL processing and request handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`url_normalizer`] - Scheme defaulting and URL validation
//! - [`filename`] - Download filename derivation from URLs
//! - [`client_ip`] - Rate-limit key extraction from HTTP requests

pub mod client_ip;
pub mod filename;
pub mod url_normalizer;
