//! DTOs for the QR download endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::qr::{ExportFormat, ExportOptions, parse_hex_color};

fn default_size() -> u32 {
    512
}

/// Query string of `GET /api/qr`.
#[derive(Debug, Deserialize, Validate)]
pub struct QrQuery {
    /// Payload to encode; normalized and validated like shorten input.
    pub url: String,

    #[serde(default)]
    pub format: ExportFormat,

    #[serde(default = "default_size")]
    #[validate(range(
        min = 1,
        max = 5000,
        message = "size must be between 1 and 5000 pixels"
    ))]
    pub size: u32,

    #[serde(default)]
    pub transparent: bool,

    /// Background colour as `#rgb` or `#rrggbb`.
    pub background: Option<String>,
}

impl QrQuery {
    /// Converts the query into export options.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `background` is not a hex colour.
    pub fn export_options(&self) -> Result<ExportOptions, AppError> {
        let background = match self.background.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_hex_color(raw).ok_or_else(|| {
                AppError::bad_request(format!("Invalid background colour '{raw}'"))
            })?),
        };

        Ok(ExportOptions {
            format: self.format,
            size: self.size,
            transparent: self.transparent,
            background,
        })
    }
}
