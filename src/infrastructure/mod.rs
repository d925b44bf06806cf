//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and holds
//! process-local runtime state.
//!
//! # Modules
//!
//! - [`rate_limit`] - In-memory fixed-window rate limiting
//! - [`shortener`] - HTTP clients for URL shortening services

pub mod rate_limit;
pub mod shortener;
