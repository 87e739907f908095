use image::GrayImage;

use crate::error::{QrError, Result};

/// Single-channel 8-bit image, row-major, one byte per pixel.
///
/// The buffer length is validated on construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GrayscaleImage {
    /// Wrap a luma buffer, rejecting buffers whose length is not `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .unwrap_or(usize::MAX);
        if pixels.len() != expected {
            return Err(QrError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        if width == 0 || height == 0 {
            return Err(QrError::EmptyImage { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Take ownership of an `image` luma buffer.
    pub fn from_luma(image: GrayImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major pixels
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at (x, y). Callers stay inside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width as usize + x]
    }

    /// Copy into an `image` buffer for resampling.
    pub(crate) fn to_luma(&self) -> Option<GrayImage> {
        GrayImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}
