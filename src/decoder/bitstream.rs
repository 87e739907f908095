/// Codeword extraction from an unmasked module grid
use crate::decoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Reads data modules in the zigzag placement order
pub struct BitstreamExtractor;

impl BitstreamExtractor {
    /// Data module bits in placement order.
    ///
    /// Column pairs are walked right to left, alternating upward and
    /// downward, skipping the vertical timing column; within a pair the
    /// right module comes first.
    pub fn extract(grid: &BitMatrix, func: &FunctionMask) -> Vec<bool> {
        let dimension = grid.width();
        let mut bits = Vec::with_capacity(func.data_modules_count());

        let mut right = dimension as isize - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = (right + 1) & 2 == 0;
            for vert in 0..dimension {
                let y = if upward { dimension - 1 - vert } else { vert };
                for j in 0..2 {
                    let x = (right - j) as usize;
                    if !func.is_function(x, y) {
                        bits.push(grid.get(x, y));
                    }
                }
            }
            right -= 2;
        }

        bits
    }

    /// Pack the first `count` whole bytes, MSB first. Remainder bits are dropped.
    pub fn codewords(bits: &[bool], count: usize) -> Vec<u8> {
        bits.chunks_exact(8)
            .take(count)
            .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }
}
