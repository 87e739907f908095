//! Grayscale to binary conversion. `true` in the output means dark.

use crate::models::{BitMatrix, GrayscaleImage};

/// Local standard deviation below which a window counts as flat.
const FLAT_STDDEV: f64 = 12.0;
const MIN_WINDOW: usize = 15;
const MAX_WINDOW: usize = 101;

/// Binarize with a single global Otsu threshold.
pub fn otsu_binarize(image: &GrayscaleImage) -> BitMatrix {
    threshold_binarize(image, otsu_threshold(image.pixels()))
}

/// Global threshold binarization: pixels below `threshold` are dark.
pub fn threshold_binarize(image: &GrayscaleImage, threshold: u8) -> BitMatrix {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let mut binary = BitMatrix::new(width, height);

    for (y, row) in image.pixels().chunks_exact(width).enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value < threshold {
                binary.set(x, y, true);
            }
        }
    }

    binary
}

/// Otsu's threshold: pixels strictly below the returned value form the dark class.
///
/// When several thresholds tie for the best between-class variance (an empty
/// gap in the histogram) the middle of that run is returned.
pub fn otsu_threshold(pixels: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in pixels {
        histogram[pixel as usize] += 1;
    }

    let total = pixels.len() as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut dark_count = 0.0f64;
    let mut dark_sum = 0.0f64;
    let mut best_variance = -1.0f64;
    let (mut best_low, mut best_high) = (128usize, 128usize);

    for threshold in 1..256usize {
        let count = histogram[threshold - 1] as f64;
        dark_count += count;
        dark_sum += (threshold - 1) as f64 * count;
        let light_count = total - dark_count;
        if dark_count == 0.0 || light_count == 0.0 {
            continue;
        }

        let dark_mean = dark_sum / dark_count;
        let light_mean = (sum_all - dark_sum) / light_count;
        let variance = dark_count * light_count * (dark_mean - light_mean).powi(2);

        let tolerance = best_variance.abs() * 1e-9;
        if variance > best_variance + tolerance {
            best_variance = variance;
            best_low = threshold;
            best_high = threshold;
        } else if (variance - best_variance).abs() <= tolerance {
            best_high = threshold;
        }
    }

    ((best_low + best_high + 1) / 2) as u8
}

/// Side of the local window for an image, odd and clamped to [15, 101].
fn window_side(width: usize, height: usize) -> usize {
    let side = (width.min(height) / 8).clamp(MIN_WINDOW, MAX_WINDOW);
    if side % 2 == 0 { side + 1 } else { side }
}

/// Summed-area tables of pixel values and squared pixel values.
struct IntegralImages {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImages {
    fn new(image: &GrayscaleImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];

        for (y, row) in image.pixels().chunks_exact(width).enumerate() {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let value = value as u64;
                row_sum += value;
                row_sq += value * value;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sq;
            }
        }

        Self {
            stride,
            sum,
            sum_sq,
        }
    }

    /// Sum and squared sum over `[x0, x1) x [y0, y1)`.
    fn window(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> (u64, u64) {
        let s = self.stride;
        let area = |table: &[u64]| {
            table[y1 * s + x1] + table[y0 * s + x0] - table[y0 * s + x1] - table[y1 * s + x0]
        };
        (area(&self.sum), area(&self.sum_sq))
    }
}

/// Hybrid local/global binarization.
///
/// Each pixel is compared against the mean of a square window around it when
/// that window has contrast (standard deviation of at least 12 grey levels);
/// flat windows defer to the global Otsu threshold so that large uniform
/// areas keep their true class under uneven illumination.
pub fn hybrid_binarize(image: &GrayscaleImage) -> BitMatrix {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let radius = window_side(width, height) / 2;
    let global = otsu_threshold(image.pixels());
    let integral = IntegralImages::new(image);
    let mut binary = BitMatrix::new(width, height);

    for y in 0..height {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius + 1).min(width);
            let count = ((x1 - x0) * (y1 - y0)) as f64;
            let (sum, sum_sq) = integral.window(x0, y0, x1, y1);
            let mean = sum as f64 / count;
            let variance = (sum_sq as f64 / count - mean * mean).max(0.0);

            let value = image.get(x, y);
            let dark = if variance >= FLAT_STDDEV * FLAT_STDDEV {
                (value as f64) < mean
            } else {
                value < global
            };
            if dark {
                binary.set(x, y, true);
            }
        }
    }

    binary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32, pixels: Vec<u8>) -> GrayscaleImage {
        GrayscaleImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_threshold_binarize() {
        let gray = image(2, 2, vec![100, 150, 200, 50]);
        let binary = threshold_binarize(&gray, 128);

        assert!(binary.get(0, 0));
        assert!(!binary.get(1, 0));
        assert!(!binary.get(0, 1));
        assert!(binary.get(1, 1));
    }

    #[test]
    fn test_otsu_threshold_splits_gap() {
        let mut pixels = vec![50u8; 50];
        pixels.extend(vec![200u8; 50]);
        let threshold = otsu_threshold(&pixels);
        assert!(threshold > 50 && threshold <= 200);
        assert!((threshold as i32 - 125).abs() <= 1);

        let binary = otsu_binarize(&image(10, 10, pixels));
        assert!(binary.get(0, 0));
        assert!(!binary.get(0, 7));
    }

    #[test]
    fn test_otsu_uniform_image_has_no_dark_pixels_when_white() {
        let binary = otsu_binarize(&image(8, 8, vec![255; 64]));
        assert_eq!(binary.count_ones(), 0);
    }

    #[test]
    fn test_window_side_is_odd_and_clamped() {
        assert_eq!(window_side(40, 40), 15);
        assert_eq!(window_side(160, 400), 21);
        assert_eq!(window_side(2000, 2000), 101);
        assert_eq!(window_side(144, 144), 19);
    }

    #[test]
    fn test_hybrid_handles_illumination_gradient() {
        // dark squares on a background that brightens from left to right;
        // the dark squares on the bright side are lighter than the
        // background on the dim side
        let (width, height) = (120u32, 40u32);
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let background = 90.0 + 150.0 * x as f32 / width as f32;
                let in_square = (x % 20) >= 6 && (x % 20) < 14 && (16..24).contains(&y);
                let value = if in_square { background * 0.45 } else { background };
                pixels.push(value as u8);
            }
        }
        let gray = image(width, height, pixels);
        let binary = hybrid_binarize(&gray);

        for square in 0..6 {
            let cx = square * 20 + 10;
            assert!(binary.get(cx, 20), "square {square} should be dark");
            assert!(!binary.get(cx, 14), "background above square {square} should be light");
        }
    }

    #[test]
    fn test_hybrid_blank_image() {
        let binary = hybrid_binarize(&image(30, 30, vec![200; 900]));
        assert_eq!(binary.count_ones(), 0);
    }
}
