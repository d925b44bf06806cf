//! QR artifact generation for download.

use crate::error::AppError;
use crate::qr::{ExportFormat, ExportOptions, encode, export_png, export_svg};
use crate::utils::filename::export_filename;
use tracing::debug;

/// A rendered QR file ready to be served or written to disk.
#[derive(Debug, Clone)]
pub struct ExportedQr {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Renders QR codes and names the resulting files.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrService;

impl QrService {
    pub fn new() -> Self {
        Self
    }

    /// Encodes `payload` and serializes it according to `options`.
    ///
    /// The filename is derived from the payload with the format's extension.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty payload, a payload too
    /// long to encode, or a PNG size outside 1..=5000.
    /// Returns [`AppError::Internal`] if image encoding fails.
    pub fn export(&self, payload: &str, options: &ExportOptions) -> Result<ExportedQr, AppError> {
        let code = encode(payload)?;

        let bytes = match options.format {
            ExportFormat::Svg => export_svg(&code, options.size, options.transparent).into_bytes(),
            ExportFormat::Png => {
                export_png(&code, options.size, options.transparent, options.background)?
            }
        };

        debug!(
            format = options.format.extension(),
            size = options.size,
            bytes = bytes.len(),
            "QR code exported"
        );

        Ok(ExportedQr {
            bytes,
            content_type: options.format.content_type(),
            filename: export_filename(payload, options.format.extension()),
        })
    }
}
