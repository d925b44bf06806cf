//! Domain layer containing entities and service contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Request-scoped data structures
//! - [`shortener`] - Shortening service trait and its typed error
//! - [`failure_policy`] - Error class to fallback/fail mapping
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - The [`shortener::UrlShortener`] trait is implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod failure_policy;
pub mod shortener;
