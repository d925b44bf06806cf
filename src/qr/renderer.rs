//! QR matrix encoding and rendering.

use image::{Rgba, RgbaImage, imageops, imageops::FilterType};
use qrcode::{Color, EcLevel, QrCode, render::svg};

use super::QrError;

/// Width of the light border around the matrix, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

pub(crate) const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub(crate) const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub(crate) const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);

const SVG_DARK: &str = "#000000";
const SVG_LIGHT: &str = "#ffffff";

/// Encodes a payload into a QR matrix at error-correction level High.
///
/// # Errors
///
/// Returns [`QrError::EmptyPayload`] for an empty payload and
/// [`QrError::DataTooLong`] when the payload exceeds QR capacity.
pub fn encode(payload: &str) -> Result<QrCode, QrError> {
    if payload.is_empty() {
        return Err(QrError::EmptyPayload);
    }

    Ok(QrCode::with_error_correction_level(
        payload.as_bytes(),
        EcLevel::H,
    )?)
}

/// Renders the matrix as SVG markup, black on white, at least `size_px` wide.
pub fn render_svg(code: &QrCode, size_px: u32) -> String {
    code.render::<svg::Color>()
        .quiet_zone(true)
        .min_dimensions(size_px, size_px)
        .dark_color(svg::Color(SVG_DARK))
        .light_color(svg::Color(SVG_LIGHT))
        .build()
}

/// Rasterises the matrix into an RGBA image of exactly `size_px × size_px`.
///
/// The matrix is first drawn at the smallest integer module scale that covers
/// `size_px`, then resized with nearest-neighbour sampling so module edges
/// stay sharp. Light modules and the quiet zone are painted with `light`.
pub fn render_raster(code: &QrCode, size_px: u32, light: Rgba<u8>) -> RgbaImage {
    let width = code.width() as u32;
    let total_modules = width + 2 * QUIET_ZONE_MODULES;
    let scale = size_px.div_ceil(total_modules).max(1);
    let native = total_modules * scale;

    let mut img = RgbaImage::from_pixel(native, native, light);

    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }

        let x = (i as u32 % width + QUIET_ZONE_MODULES) * scale;
        let y = (i as u32 / width + QUIET_ZONE_MODULES) * scale;

        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x + dx, y + dy, DARK);
            }
        }
    }

    if native == size_px {
        img
    } else {
        imageops::resize(&img, size_px, size_px, FilterType::Nearest)
    }
}
