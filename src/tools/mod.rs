use crate::error::{QrError, Result};
use crate::models::{BitMatrix, GrayscaleImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image file of any supported container format as luma.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<GrayscaleImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| QrError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    GrayscaleImage::from_luma(img.to_luma8())
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    /// Count of dark pixels.
    pub dark_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of dark pixels to total pixels.
    pub dark_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(image: &GrayscaleImage) -> GrayStats {
    let pixels = image.pixels();
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in pixels {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if pixels.is_empty() {
        0
    } else {
        (sum / pixels.len() as u64) as u8
    };
    GrayStats { min, max, avg }
}

/// Compute dark pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let dark = binary.count_ones();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    BinaryStats {
        dark_pixels: dark,
        total_pixels: total,
        dark_ratio: ratio,
    }
}

/// Expand a command-line argument: directories yield their image files
/// (recursively, sorted), anything else is passed through unchanged.
pub fn expand_image_paths<P: AsRef<Path>>(path: P) -> Vec<PathBuf> {
    let path = path.as_ref();
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut images = collect_images(path);
    images.sort();
    images
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp" | "tif" | "tiff") {
                    images.push(path);
                }
            }
        }
    }

    images
}
