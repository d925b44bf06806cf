//! Core domain entities.
//!
//! All entities are transient, request-scoped values; nothing is persisted.
//!
//! # Entity Types
//!
//! - [`ShortenResult`] - The URL pair produced by a shorten request
//! - [`ShortenedUrl`] - A short link record returned by the shortening service

pub mod shorten_result;
pub mod shortened_url;

pub use shorten_result::ShortenResult;
pub use shortened_url::{LinkStatus, ShortenedUrl};
