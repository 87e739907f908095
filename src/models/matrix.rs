/// Packed bit matrix used for binarized images and sampled module grids.
///
/// `true` means dark. Rows are padded to whole 64-bit words so that row
/// access never straddles two rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    row_words: usize,
    words: Vec<u64>,
}

impl BitMatrix {
    /// Create an all-light matrix.
    pub fn new(width: usize, height: usize) -> Self {
        let row_words = width.div_ceil(64);
        Self {
            width,
            height,
            row_words,
            words: vec![0; row_words * height],
        }
    }

    /// Create an all-light square matrix, the shape of a module grid.
    pub fn square(dimension: usize) -> Self {
        Self::new(dimension, dimension)
    }

    /// Matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn slot(&self, x: usize, y: usize) -> (usize, u64) {
        (y * self.row_words + x / 64, 1u64 << (x % 64))
    }

    /// Bit at (x, y); out-of-range reads are light.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, mask) = self.slot(x, y);
        self.words[word] & mask != 0
    }

    /// Bit at signed coordinates, `None` outside the matrix.
    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> Option<bool> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get(x, y))
    }

    /// Set bit at (x, y); out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (word, mask) = self.slot(x, y);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Flip bit at (x, y).
    #[inline]
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (word, mask) = self.slot(x, y);
        self.words[word] ^= mask;
    }

    /// Set every bit of a rectangle, clipped to the matrix.
    pub fn set_region(&mut self, left: usize, top: usize, width: usize, height: usize) {
        let right = (left + width).min(self.width);
        let bottom = (top + height).min(self.height);
        for y in top..bottom {
            for x in left..right {
                self.set(x, y, true);
            }
        }
    }

    /// Number of dark bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
