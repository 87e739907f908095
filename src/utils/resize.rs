//! Rescaled retries for images whose symbols are too small or too large.

use image::imageops::{self, FilterType};

use crate::config::DecodeOptions;
use crate::models::GrayscaleImage;

/// Smallest side, in pixels, a version-1 symbol can occupy at one pixel per module.
const MIN_SIDE: f32 = 21.0;
/// Factors this close to 1.0 would repeat the baseline pass.
const IDENTITY_BAND: f32 = 0.05;

/// A resampled copy and the per-axis scale from source to copy.
#[derive(Debug, Clone)]
pub struct ScaledImage {
    /// Resampled pixels
    pub image: GrayscaleImage,
    /// `new_width / width`
    pub scale_x: f32,
    /// `new_height / height`
    pub scale_y: f32,
}

/// Scale factors to retry with, largest first.
///
/// Factors are spread evenly between the ones that bring the longer side to
/// the minimum and maximum target dimensions.
pub fn resize_factors(width: u32, height: u32, options: &DecodeOptions) -> Vec<f32> {
    let longer = width.max(height) as f32;
    let shorter = width.min(height) as f32;
    if longer <= 0.0 {
        return Vec::new();
    }
    let min_factor = options.min_target_dimension / longer;
    let max_factor = options.max_target_dimension / longer;
    let steps = options.resize_steps.max(1);

    (0..=steps)
        .map(|k| max_factor - (max_factor - min_factor) * k as f32 / steps as f32)
        .filter(|f| f.is_finite() && *f > 0.0)
        .filter(|f| (f - 1.0).abs() > IDENTITY_BAND)
        .filter(|f| shorter * f >= MIN_SIDE)
        .collect()
}

/// Resample `image` by `factor` with a triangle (bilinear) filter.
pub fn rescale(image: &GrayscaleImage, factor: f32) -> Option<ScaledImage> {
    let new_width = (image.width() as f32 * factor).round() as u32;
    let new_height = (image.height() as f32 * factor).round() as u32;
    if new_width == 0 || new_height == 0 {
        return None;
    }

    let luma = image.to_luma()?;
    let resized = imageops::resize(&luma, new_width, new_height, FilterType::Triangle);
    let image_out = GrayscaleImage::from_luma(resized).ok()?;
    Some(ScaledImage {
        scale_x: new_width as f32 / image.width() as f32,
        scale_y: new_height as f32 / image.height() as f32,
        image: image_out,
    })
}
