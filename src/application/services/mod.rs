//! Business logic services for the application layer.

pub mod qr_service;
pub mod shorten_service;

pub use qr_service::{ExportedQr, QrService};
pub use shorten_service::ShortenService;
