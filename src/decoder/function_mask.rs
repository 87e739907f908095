use super::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let d = version.dimension();
        let mut mask = BitMatrix::square(d);

        // finders with separators and format areas
        mask.set_region(0, 0, 9, 9);
        mask.set_region(d - 8, 0, 8, 9);
        mask.set_region(0, d - 8, 9, 8);

        // timing
        mask.set_region(6, 0, 1, d);
        mask.set_region(0, 6, d, 1);

        let positions = alignment_pattern_positions(version);
        let last = positions.len().saturating_sub(1);
        for (i, &cx) in positions.iter().enumerate() {
            for (j, &cy) in positions.iter().enumerate() {
                let on_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !on_finder {
                    mask.set_region(cx - 2, cy - 2, 5, 5);
                }
            }
        }

        if version.has_version_info() {
            mask.set_region(d - 11, 0, 3, 6);
            mask.set_region(0, d - 11, 6, 3);
        }

        Self { mask, version }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn data_modules_count(&self) -> usize {
        let d = self.mask.width();
        d * d - self.mask.count_ones()
    }
}
