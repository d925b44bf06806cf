//! PNG and SVG export with optional background transparency.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::QrCode;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::io::Cursor;
use std::sync::LazyLock;

use super::QrError;
use super::renderer::{CLEAR, WHITE, render_raster, render_svg};

/// Smallest accepted PNG edge length, in pixels.
pub const MIN_PNG_SIZE: u32 = 1;

/// Largest accepted PNG edge length, in pixels.
pub const MAX_PNG_SIZE: u32 = 5000;

/// Channel value at or above which a colour counts as near-white.
pub const NEAR_WHITE_THRESHOLD: u8 = 250;

static FILL_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"fill\s*=\s*["']([^"']*)["']"#).expect("fill attribute regex is valid")
});

static FILL_STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"fill\s*:\s*([^;"'}]+)"#).expect("fill style regex is valid")
});

static RGB_FN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})").expect("rgb regex is valid")
});

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml; charset=utf-8",
            ExportFormat::Png => "image/png",
        }
    }
}

/// Options controlling a single export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Edge length in pixels. Exact for PNG, a lower bound for SVG.
    pub size: u32,
    /// Drop the white background instead of painting it.
    pub transparent: bool,
    /// Background for opaque PNG exports. Defaults to white.
    pub background: Option<Rgba<u8>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Svg,
            size: 512,
            transparent: false,
            background: None,
        }
    }
}

/// Returns `true` if `size` is an acceptable PNG edge length (1..=5000).
pub fn validate_png_size(size: u32) -> bool {
    (MIN_PNG_SIZE..=MAX_PNG_SIZE).contains(&size)
}

/// Serializes the code as SVG markup.
///
/// With `transparent`, every white or near-white fill is replaced by `none`.
pub fn export_svg(code: &QrCode, size: u32, transparent: bool) -> String {
    let svg = render_svg(code, size);

    if transparent {
        strip_white_fills(&svg)
    } else {
        svg
    }
}

/// Serializes the code as a PNG of exactly `size × size` pixels.
///
/// Opaque exports paint the quiet zone and light modules with `background`
/// (white when `None`). Transparent exports leave them unpainted and then
/// clear the alpha of every remaining near-white pixel.
///
/// # Errors
///
/// Returns [`QrError::InvalidSize`] outside 1..=5000 and [`QrError::Image`]
/// if PNG encoding fails.
pub fn export_png(
    code: &QrCode,
    size: u32,
    transparent: bool,
    background: Option<Rgba<u8>>,
) -> Result<Vec<u8>, QrError> {
    if !validate_png_size(size) {
        return Err(QrError::InvalidSize(size));
    }

    let img = if transparent {
        let mut img = render_raster(code, size, CLEAR);
        clear_near_white(&mut img);
        img
    } else {
        render_raster(code, size, background.unwrap_or(WHITE))
    };

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

    Ok(bytes)
}

/// Zeroes the alpha channel of every pixel whose RGB is at least (250, 250, 250).
pub fn clear_near_white(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r >= NEAR_WHITE_THRESHOLD && g >= NEAR_WHITE_THRESHOLD && b >= NEAR_WHITE_THRESHOLD {
            pixel.0[3] = 0;
        }
    }
}

/// Replaces white and near-white fills in SVG markup with `none`.
///
/// Handles `fill="..."` attributes and `fill:` declarations inside inline
/// styles. Colours may be hex (`#fff`, `#fafafa`), `white`, or `rgb()`/`rgba()`.
pub fn strip_white_fills(svg: &str) -> String {
    let svg = FILL_ATTR_REGEX.replace_all(svg, |caps: &Captures| {
        if is_near_white(&caps[1]) {
            r#"fill="none""#.to_string()
        } else {
            caps[0].to_string()
        }
    });

    FILL_STYLE_REGEX
        .replace_all(&svg, |caps: &Captures| {
            if is_near_white(&caps[1]) {
                "fill:none".to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Returns `true` for CSS colours whose RGB channels are all at least 250.
pub fn is_near_white(color: &str) -> bool {
    let color = color.trim().to_ascii_lowercase();

    if color == "white" {
        return true;
    }

    let rgb = if color.starts_with('#') {
        parse_hex_color(&color).map(|c| [c.0[0], c.0[1], c.0[2]])
    } else {
        RGB_FN_REGEX.captures(&color).and_then(|caps| {
            Some([
                caps[1].parse::<u8>().ok()?,
                caps[2].parse::<u8>().ok()?,
                caps[3].parse::<u8>().ok()?,
            ])
        })
    };

    rgb.is_some_and(|channels| channels.iter().all(|&c| c >= NEAR_WHITE_THRESHOLD))
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` into an RGBA colour.
pub fn parse_hex_color(input: &str) -> Option<Rgba<u8>> {
    let hex = input.trim().strip_prefix('#')?;

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                rgb[i] = channel(&c.to_string().repeat(2))?;
            }
            Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                255
            };
            Some(Rgba([r, g, b, a]))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::renderer::encode;

    fn sample_code() -> QrCode {
        encode("https://example.com/a?b=1").unwrap()
    }

    #[test]
    fn test_validate_png_size_bounds() {
        assert!(!validate_png_size(0));
        assert!(validate_png_size(1));
        assert!(validate_png_size(512));
        assert!(validate_png_size(5000));
        assert!(!validate_png_size(5001));
    }

    #[test]
    fn test_export_format_metadata() {
        assert_eq!(ExportFormat::Svg.extension(), "svg");
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::Png.content_type(), "image/png");
        assert!(ExportFormat::Svg.content_type().starts_with("image/svg+xml"));
    }

    #[test]
    fn test_clear_near_white() {
        let mut img = RgbaImage::new(4, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([250, 250, 250, 255]));
        img.put_pixel(2, 0, Rgba([249, 255, 255, 255]));
        img.put_pixel(3, 0, Rgba([0, 0, 0, 255]));

        clear_near_white(&mut img);

        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(1, 0).0[3], 0);
        assert_eq!(img.get_pixel(2, 0).0[3], 255);
        assert_eq!(img.get_pixel(3, 0).0[3], 255);
    }

    #[test]
    fn test_clear_near_white_no_opaque_white_remains() {
        let mut img = RgbaImage::from_fn(64, 64, |x, y| {
            let v = ((x * 4 + y) % 256) as u8;
            Rgba([v, v.saturating_add(3), 255 - (v / 2), 255])
        });
        let original = img.clone();

        clear_near_white(&mut img);

        for (before, after) in original.pixels().zip(img.pixels()) {
            let [r, g, b, _] = before.0;
            if r >= 250 && g >= 250 && b >= 250 {
                assert_ne!(after.0[3], 255);
            } else {
                assert_eq!(after.0[3], 255);
            }
        }
    }

    #[test]
    fn test_export_png_rejects_bad_size() {
        let code = sample_code();
        assert!(matches!(
            export_png(&code, 0, false, None),
            Err(QrError::InvalidSize(0))
        ));
        assert!(matches!(
            export_png(&code, 5001, false, None),
            Err(QrError::InvalidSize(5001))
        ));
    }

    #[test]
    fn test_export_png_opaque() {
        let code = sample_code();
        let bytes = export_png(&code, 300, false, None).unwrap();

        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(img.dimensions(), (300, 300));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_export_png_background() {
        let code = sample_code();
        let bg = Rgba([10, 20, 200, 255]);
        let bytes = export_png(&code, 128, false, Some(bg)).unwrap();

        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(*img.get_pixel(0, 0), bg);
    }

    #[test]
    fn test_export_png_transparent() {
        let code = sample_code();
        let bytes = export_png(&code, 256, true, None).unwrap();

        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (256, 256));
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert!(img.pixels().any(|p| p.0 == [0, 0, 0, 255]));
        assert!(
            img.pixels()
                .filter(|p| p.0[0] >= 250 && p.0[1] >= 250 && p.0[2] >= 250)
                .all(|p| p.0[3] != 255)
        );
    }

    #[test]
    fn test_export_svg_opaque_is_verbatim() {
        let code = sample_code();
        assert_eq!(export_svg(&code, 256, false), render_svg(&code, 256));
    }

    #[test]
    fn test_export_svg_transparent() {
        let code = sample_code();
        let svg = export_svg(&code, 256, true);

        assert!(!svg.contains(r##"fill="#ffffff""##));
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains("#000000"));
    }

    #[test]
    fn test_strip_white_fills_variants() {
        let svg = concat!(
            r##"<svg><rect fill="#fff"/><rect fill='white'/><rect fill="#FAFAFA"/>"##,
            r##"<rect fill="#f9f9f9"/><rect style="stroke:red;fill: rgb(255, 251, 250)"/>"##,
            r##"<path fill="#000"/></svg>"##
        );

        let out = strip_white_fills(svg);

        assert_eq!(out.matches(r#"fill="none""#).count(), 3);
        assert!(out.contains(r##"fill="#f9f9f9""##));
        assert!(out.contains("fill:none"));
        assert!(out.contains("stroke:red"));
        assert!(out.contains(r##"fill="#000""##));
    }

    #[test]
    fn test_is_near_white() {
        assert!(is_near_white("white"));
        assert!(is_near_white("#FFF"));
        assert!(is_near_white("#fafafa"));
        assert!(is_near_white("rgba(255,255,255,0.5)"));
        assert!(!is_near_white("#f9fafa"));
        assert!(!is_near_white("black"));
        assert!(!is_near_white("none"));
        assert!(!is_near_white("rgb(300, 255, 255)"));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_hex_color("#102030"), Some(Rgba([16, 32, 48, 255])));
        assert_eq!(parse_hex_color("#10203080"), Some(Rgba([16, 32, 48, 128])));
        assert_eq!(parse_hex_color("102030"), None);
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
