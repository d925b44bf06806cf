//! QR code rendering and export.
//!
//! The QR matrix comes from the `qrcode` crate; this module owns turning it
//! into downloadable artifacts:
//!
//! - [`renderer`] - Matrix encoding, SVG markup and RGBA rasterisation
//! - [`export`] - PNG/SVG serialization with optional background transparency
//!
//! Every code is encoded at error-correction level High with a four-module
//! quiet zone, so it stays scannable when printed small or partially covered.

pub mod export;
pub mod renderer;

pub use export::{
    ExportFormat, ExportOptions, MAX_PNG_SIZE, MIN_PNG_SIZE, clear_near_white, export_png,
    export_svg, is_near_white, parse_hex_color, strip_white_fills, validate_png_size,
};
pub use renderer::{QUIET_ZONE_MODULES, encode, render_raster, render_svg};

/// Errors that can occur while rendering or exporting a QR code.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR payload must not be empty")]
    EmptyPayload,

    #[error("PNG size must be between 1 and 5000 pixels, got {0}")]
    InvalidSize(u32),

    #[error("URL is too long to fit in a QR code")]
    DataTooLong,

    #[error("Failed to encode QR code: {0}")]
    Encode(qrcode::types::QrError),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

impl From<qrcode::types::QrError> for QrError {
    fn from(err: qrcode::types::QrError) -> Self {
        match err {
            qrcode::types::QrError::DataTooLong => QrError::DataTooLong,
            other => QrError::Encode(other),
        }
    }
}
