//! Per-client request limiting.
//!
//! - [`FixedWindowLimiter`] - In-memory fixed-window counter keyed by client IP

mod fixed_window;

pub use fixed_window::{FixedWindowLimiter, RateLimitRecord};
