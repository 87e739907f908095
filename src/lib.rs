//! qrlyzer - QR code detection and decoding for grayscale images
//!
//! A pure Rust pipeline: binarize, find finder patterns, group them into
//! symbol candidates, sample the module grid and decode it with full
//! Reed-Solomon correction. Images whose symbols are too small or too large
//! for the first pass can be retried on rescaled copies.
//!
//! ```
//! let pixels = vec![255u8; 64 * 48];
//! let image = qrlyzer::GrayscaleImage::new(64, 48, pixels).unwrap();
//! assert!(qrlyzer::decode(&image, false).is_empty());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decode tunables and environment overrides
pub mod config;
/// QR code decoding modules (error correction, format extraction, data modes)
#[allow(missing_docs)]
pub mod decoder;
/// QR code detection modules (finder patterns, grouping, alignment, sampling)
#[allow(missing_docs)]
pub mod detector;
/// Caller-facing errors
pub mod error;
/// Core data structures (GrayscaleImage, BitMatrix, DecodedSymbol, etc.)
#[allow(missing_docs)]
pub mod models;
/// Detect-and-decode passes and the resize retry
pub mod pipeline;
/// Image file loading and statistics for the command-line tool
pub mod tools;
/// Utility functions (binarization, geometry, resampling)
#[allow(missing_docs)]
pub mod utils;

use std::path::Path;

pub use config::DecodeOptions;
pub use error::{QrError, Result};
pub use models::{
    BitMatrix, BoundingBox, DataSegment, DecodedSymbol, Detection, ECLevel, GrayscaleImage,
    MaskPattern, Point, SegmentMode, Version,
};
pub use pipeline::decode_with_options;

/// Decode every QR symbol in a grayscale image.
///
/// Uses [`DecodeOptions::from_env`] for the tunables. With `auto_resize`,
/// an image that yields nothing is retried on rescaled copies and the first
/// copy that yields anything wins. Symbols are returned in the order they
/// were accepted; an image without symbols gives an empty list.
pub fn decode(image: &GrayscaleImage, auto_resize: bool) -> Vec<DecodedSymbol> {
    decode_with_options(image, &DecodeOptions::from_env().with_auto_resize(auto_resize))
}

/// Load an image file, convert it to luma and return the decoded texts.
pub fn detect_and_decode<P: AsRef<Path>>(path: P, auto_resize: bool) -> Result<Vec<String>> {
    let image = tools::load_grayscale(path)?;
    Ok(texts(decode(&image, auto_resize)))
}

/// Like [`detect_and_decode`], with each symbol's bounding box.
pub fn detect_and_decode_with_bbox<P: AsRef<Path>>(
    path: P,
    auto_resize: bool,
) -> Result<Vec<Detection>> {
    let image = tools::load_grayscale(path)?;
    Ok(detections(&image, decode(&image, auto_resize)))
}

/// Decode a raw single-channel buffer of `width * height` bytes.
///
/// The buffer length is checked before any decoding work.
pub fn detect_and_decode_from_bytes(
    data: &[u8],
    width: u32,
    height: u32,
    auto_resize: bool,
) -> Result<Vec<String>> {
    let image = GrayscaleImage::new(width, height, data.to_vec())?;
    Ok(texts(decode(&image, auto_resize)))
}

/// Like [`detect_and_decode_from_bytes`], with each symbol's bounding box.
pub fn detect_and_decode_from_bytes_with_bbox(
    data: &[u8],
    width: u32,
    height: u32,
    auto_resize: bool,
) -> Result<Vec<Detection>> {
    let image = GrayscaleImage::new(width, height, data.to_vec())?;
    Ok(detections(&image, decode(&image, auto_resize)))
}

fn texts(symbols: Vec<DecodedSymbol>) -> Vec<String> {
    symbols.into_iter().map(|symbol| symbol.text).collect()
}

fn detections(image: &GrayscaleImage, symbols: Vec<DecodedSymbol>) -> Vec<Detection> {
    symbols
        .into_iter()
        .filter_map(|symbol| {
            let bbox = symbol.bounding_box(image.width(), image.height())?;
            Some(Detection {
                content: symbol.text,
                bbox,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty() {
        let image = GrayscaleImage::new(10, 10, vec![0u8; 100]).unwrap();
        assert!(decode(&image, false).is_empty());
        assert!(decode(&image, true).is_empty());
    }

    #[test]
    fn test_bytes_entry_validates_length() {
        // an RGB buffer passed as luma
        let data = vec![255u8; 20 * 10 * 3];
        match detect_and_decode_from_bytes(&data, 20, 10, false) {
            Err(QrError::BufferSize { expected, actual }) => {
                assert_eq!(expected, 200);
                assert_eq!(actual, 600);
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(matches!(
            detect_and_decode_from_bytes_with_bbox(&[], 0, 0, true),
            Err(QrError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = detect_and_decode("does/not/exist.png", false).unwrap_err();
        assert!(matches!(err, QrError::ImageLoad { .. }));
    }
}
