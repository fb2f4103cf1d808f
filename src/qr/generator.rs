//! QR code rendering for payload strings.

use image::{imageops, DynamicImage, Rgba, RgbaImage};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during QR code operations.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR code generation failed: {0}")]
    GenerationError(String),

    #[error("Invalid foreground color '{0}': expected #rrggbb")]
    InvalidColor(String),

    #[error("Overlay icon error: {0}")]
    OverlayError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("QR code read error: {0}")]
    QrReadError(String),

    #[error("No QR code found in image")]
    NoQrCodeFound,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Output format for QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrFormat {
    /// PNG image (default)
    Png,
    /// SVG vector image
    Svg,
    /// ASCII art (for terminal display)
    Ascii,
}

impl Default for QrFormat {
    fn default() -> Self {
        Self::Png
    }
}

/// Configuration for QR code rendering.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Error correction level (default: Medium)
    pub ec_level: EcLevel,
    /// Module size in pixels (default: 10)
    pub module_size: u32,
    /// Quiet zone size in modules (default: 4)
    pub quiet_zone: u32,
    /// Output format
    pub format: QrFormat,
    /// Foreground color as `#rrggbb` (default: black)
    pub fg_color: String,
    /// Optional icon composited over the center of the code.
    /// Error correction is forced to High so the covered modules recover.
    pub overlay: Option<PathBuf>,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            module_size: 10,
            quiet_zone: 4,
            format: QrFormat::Png,
            fg_color: "#000000".to_string(),
            overlay: None,
        }
    }
}

/// Output from QR code rendering.
pub enum QrOutput {
    /// PNG/image output
    Image(DynamicImage),
    /// SVG string output
    Svg(String),
    /// ASCII art output
    Ascii(String),
}

impl QrOutput {
    /// Returns true if this is an image output.
    pub fn is_image(&self) -> bool {
        matches!(self, QrOutput::Image(_))
    }

    /// Returns the image if this is an image output.
    pub fn into_image(self) -> Option<DynamicImage> {
        match self {
            QrOutput::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Returns the string content (for SVG or ASCII).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            QrOutput::Svg(s) | QrOutput::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders a payload string as a QR code.
///
/// # Arguments
/// * `text` - The string to encode (deep link or raw payload)
/// * `config` - Rendering configuration
pub fn render(text: &str, config: &QrConfig) -> Result<QrOutput, QrError> {
    let (r, g, b) = parse_color(&config.fg_color)?;

    // An overlay hides center modules, so force the strongest correction
    let ec_level = if config.overlay.is_some() {
        EcLevel::H
    } else {
        config.ec_level
    };

    let qr = QrCode::with_error_correction_level(text, ec_level)
        .map_err(|e| QrError::GenerationError(e.to_string()))?;

    match config.format {
        QrFormat::Png => {
            let mut canvas: RgbaImage = qr
                .render::<Rgba<u8>>()
                .min_dimensions(200, 200)
                .quiet_zone(config.quiet_zone > 0)
                .module_dimensions(config.module_size, config.module_size)
                .dark_color(Rgba([r, g, b, 255]))
                .light_color(Rgba([255, 255, 255, 255]))
                .build();

            if let Some(icon_path) = &config.overlay {
                composite_overlay(&mut canvas, icon_path)?;
            }

            Ok(QrOutput::Image(DynamicImage::ImageRgba8(canvas)))
        }
        QrFormat::Svg => {
            let svg_string = qr
                .render()
                .min_dimensions(200, 200)
                .quiet_zone(config.quiet_zone > 0)
                .dark_color(svg::Color(&config.fg_color))
                .light_color(svg::Color("#ffffff"))
                .build();

            Ok(QrOutput::Svg(svg_string))
        }
        QrFormat::Ascii => {
            let ascii = qr
                .render::<char>()
                .quiet_zone(config.quiet_zone > 0)
                .module_dimensions(2, 1)
                .build();

            Ok(QrOutput::Ascii(ascii))
        }
    }
}

/// Renders a payload string and saves it to a file.
pub fn render_to_file<P: AsRef<Path>>(
    text: &str,
    path: P,
    config: &QrConfig,
) -> Result<(), QrError> {
    let output = render(text, config)?;
    let path = path.as_ref();

    match output {
        QrOutput::Image(img) => {
            img.save(path)
                .map_err(|e| QrError::ImageSaveError(e.to_string()))?;
        }
        QrOutput::Svg(svg) => {
            std::fs::write(path, svg)?;
        }
        QrOutput::Ascii(ascii) => {
            std::fs::write(path, ascii)?;
        }
    }

    Ok(())
}

/// Pastes the icon over the center of the rendered code, scaled to a fifth
/// of the code's width.
fn composite_overlay(canvas: &mut RgbaImage, icon_path: &Path) -> Result<(), QrError> {
    let icon = image::open(icon_path).map_err(|e| QrError::OverlayError(e.to_string()))?;

    let side = (canvas.width().min(canvas.height()) / 5).max(1);
    let icon = icon
        .resize(side, side, imageops::FilterType::Lanczos3)
        .to_rgba8();

    let x = (canvas.width().saturating_sub(icon.width())) / 2;
    let y = (canvas.height().saturating_sub(icon.height())) / 2;
    imageops::overlay(canvas, &icon, x as i64, y as i64);

    Ok(())
}

/// Parses a `#rrggbb` hex color.
fn parse_color(color: &str) -> Result<(u8, u8, u8), QrError> {
    let invalid = || QrError::InvalidColor(color.to_string());

    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
    Ok((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_png() {
        let output = render("https://masterqr.app/?d=hello", &QrConfig::default()).unwrap();
        assert!(output.is_image());
    }

    #[test]
    fn test_render_ascii() {
        let config = QrConfig {
            format: QrFormat::Ascii,
            ..Default::default()
        };
        let output = render("test", &config).unwrap();
        let ascii = output.as_string().unwrap();
        assert!(ascii.contains('█') || ascii.contains('#') || ascii.contains(' '));
    }

    #[test]
    fn test_render_svg_carries_color() {
        let config = QrConfig {
            format: QrFormat::Svg,
            fg_color: "#2563eb".to_string(),
            ..Default::default()
        };
        let output = render("svg test", &config).unwrap();
        let svg = output.as_string().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#2563eb"));
    }

    #[test]
    fn test_render_colored_png() {
        let config = QrConfig {
            fg_color: "#dc2626".to_string(),
            ..Default::default()
        };
        let output = render("colored", &config).unwrap();
        let img = output.into_image().unwrap().to_rgba8();
        // Corner finder pattern must carry the requested color
        assert!(img.pixels().any(|p| p.0 == [220, 38, 38, 255]));
    }

    #[test]
    fn test_invalid_color_rejected() {
        for bad in ["red", "#12345", "#gggggg", "123456"] {
            let config = QrConfig {
                fg_color: bad.to_string(),
                ..Default::default()
            };
            assert!(matches!(
                render("x", &config),
                Err(QrError::InvalidColor(_))
            ));
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#000000").unwrap(), (0, 0, 0));
        assert_eq!(parse_color("#2563eb").unwrap(), (0x25, 0x63, 0xeb));
    }

    #[test]
    fn test_render_typical_deep_link() {
        // A sealed payload link is the longest thing we render routinely
        let long = format!(
            "https://masterqr.app/?d=MASTERQR%3AENC%3A{}&exp=1767225600000",
            "A".repeat(400)
        );
        let output = render(&long, &QrConfig::default()).unwrap();
        assert!(output.is_image());
    }
}
