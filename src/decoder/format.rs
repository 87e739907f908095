/// Format information extraction from a sampled module grid
use super::bch::BchDecoder;
use crate::error::CandidateError;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Error correction level and data mask of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
}

impl FormatInfo {
    /// Read and decode both format copies. They must each decode and agree.
    pub(crate) fn extract(grid: &BitMatrix) -> Result<Self, CandidateError> {
        let (first, second) = Self::read_copies(grid);
        let first = BchDecoder::decode_format(first).ok_or(CandidateError::FormatInfo)?;
        let second = BchDecoder::decode_format(second).ok_or(CandidateError::FormatInfo)?;
        if first != second {
            return Err(CandidateError::FormatInfo);
        }
        Ok(Self::from_data_bits(first))
    }

    /// Level and mask from the five data bits.
    pub fn from_data_bits(data: u8) -> Self {
        Self {
            ec_level: ECLevel::from_format_bits(data >> 3),
            mask: MaskPattern::from_bits(data),
        }
    }

    /// Raw 15-bit reads, most significant bit first.
    ///
    /// The first copy wraps around the top-left finder; the second is split
    /// between the bottom-left and top-right finders.
    fn read_copies(grid: &BitMatrix) -> (u16, u16) {
        let d = grid.width();
        let mut first = 0u16;
        let push = |bits: &mut u16, x: usize, y: usize| {
            *bits = (*bits << 1) | grid.get(x, y) as u16;
        };

        for x in 0..6 {
            push(&mut first, x, 8);
        }
        push(&mut first, 7, 8);
        push(&mut first, 8, 8);
        push(&mut first, 8, 7);
        for y in (0..6).rev() {
            push(&mut first, 8, y);
        }

        let mut second = 0u16;
        for y in (d - 7..d).rev() {
            push(&mut second, 8, y);
        }
        for x in d - 8..d {
            push(&mut second, x, 8);
        }

        (first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::bch::format_codeword;

    /// Write a format codeword into both copies of an otherwise blank grid.
    fn grid_with_format(codeword: u16, d: usize) -> BitMatrix {
        let mut grid = BitMatrix::square(d);
        let bit = |i: usize| (codeword >> (14 - i)) & 1 == 1;
        let first: Vec<(usize, usize)> = (0..6)
            .map(|x| (x, 8))
            .chain([(7, 8), (8, 8), (8, 7)])
            .chain((0..6).rev().map(|y| (8, y)))
            .collect();
        let second: Vec<(usize, usize)> = (d - 7..d)
            .rev()
            .map(|y| (8, y))
            .chain((d - 8..d).map(|x| (x, 8)))
            .collect();
        for positions in [first, second] {
            for (i, (x, y)) in positions.into_iter().enumerate() {
                grid.set(x, y, bit(i));
            }
        }
        grid
    }

    #[test]
    fn test_extracts_level_and_mask() {
        let grid = grid_with_format(format_codeword(0b00_010), 21);
        let info = FormatInfo::extract(&grid).unwrap();
        assert_eq!(info.ec_level, ECLevel::M);
        assert_eq!(info.mask, MaskPattern::Pattern2);
    }

    #[test]
    fn test_tolerates_damaged_copy() {
        let mut grid = grid_with_format(format_codeword(0b11_101), 25);
        grid.toggle(0, 8);
        grid.toggle(8, 0);
        let info = FormatInfo::extract(&grid).unwrap();
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask, MaskPattern::Pattern5);
    }

    #[test]
    fn test_disagreeing_copies_fail() {
        let mut grid = grid_with_format(format_codeword(0b01_000), 21);
        let other = grid_with_format(format_codeword(0b10_111), 21);
        for x in 13..21 {
            grid.set(x, 8, other.get(x, 8));
        }
        for y in 14..21 {
            grid.set(8, y, other.get(8, y));
        }
        assert_eq!(FormatInfo::extract(&grid), Err(CandidateError::FormatInfo));
    }
}
