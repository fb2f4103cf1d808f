//! QR code reading and decoding.
//!
//! Reads QR codes from images and returns the decoded payload string,
//! ready for the deep-link parser.

use image::DynamicImage;
use rqrr::PreparedImage;
use std::path::Path;

use super::QrError;

/// Reads a QR code from an image and returns the decoded string.
///
/// # Arguments
/// * `image` - The image containing the QR code
pub fn read_qr(image: &DynamicImage) -> Result<String, QrError> {
    // Convert to grayscale for QR detection
    let gray = image.to_luma8();

    let mut prepared = PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    if grids.is_empty() {
        return Err(QrError::NoQrCodeFound);
    }

    // Decode the first QR code found
    let (_, content) = grids[0]
        .decode()
        .map_err(|e| QrError::QrReadError(format!("Failed to decode QR: {:?}", e)))?;

    Ok(content)
}

/// Reads a QR code from an image file and returns the decoded string.
pub fn read_qr_from_file<P: AsRef<Path>>(path: P) -> Result<String, QrError> {
    let image = image::open(path).map_err(|e| QrError::QrReadError(e.to_string()))?;

    read_qr(&image)
}

/// Reads all QR codes from an image and returns their decoded strings.
///
/// Useful when an image might contain multiple QR codes (batch scanning).
pub fn read_all_qr(image: &DynamicImage) -> Result<Vec<String>, QrError> {
    let gray = image.to_luma8();
    let mut prepared = PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    if grids.is_empty() {
        return Err(QrError::NoQrCodeFound);
    }

    let mut results = Vec::new();
    for grid in grids {
        if let Ok((_, content)) = grid.decode() {
            results.push(content);
        }
    }

    if results.is_empty() {
        return Err(QrError::NoQrCodeFound);
    }

    Ok(results)
}
