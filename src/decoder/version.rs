/// Version information extraction for QR codes v7+
use super::bch::BchDecoder;
use crate::error::CandidateError;
use crate::models::{BitMatrix, Version};

/// Version info is 18 bits (6 data + 12 ECC), stored twice
pub struct VersionInfo;

impl VersionInfo {
    /// Check the version blocks of a grid sampled as `expected`.
    ///
    /// Below version 7 there is nothing to read. Otherwise both copies must
    /// decode to the same version, and that version must match the grid;
    /// a clean read of another version is reported as a mismatch so the
    /// caller can resample.
    pub(crate) fn verify(grid: &BitMatrix, expected: Version) -> Result<(), CandidateError> {
        if !expected.has_version_info() {
            return Ok(());
        }
        let (top_right, bottom_left) = Self::read_copies(grid);
        let first = BchDecoder::decode_version(top_right).ok_or(CandidateError::VersionInfo)?;
        let second = BchDecoder::decode_version(bottom_left).ok_or(CandidateError::VersionInfo)?;
        if first != second {
            return Err(CandidateError::VersionInfo);
        }
        if first != expected.number() {
            return Err(CandidateError::VersionMismatch {
                expected: expected.number(),
                found: first,
            });
        }
        Ok(())
    }

    /// Raw reads of the 3x6 block left of the top-right finder and the
    /// transposed block above the bottom-left finder, MSB first.
    fn read_copies(grid: &BitMatrix) -> (u32, u32) {
        let d = grid.width();
        let mut top_right = 0u32;
        let mut bottom_left = 0u32;

        for major in (0..6).rev() {
            for minor in (d - 11..=d - 9).rev() {
                // top-right: row `major`, column `minor`
                top_right = (top_right << 1) | grid.get(minor, major) as u32;
                // bottom-left: row `minor`, column `major`
                bottom_left = (bottom_left << 1) | grid.get(major, minor) as u32;
            }
        }

        (top_right, bottom_left)
    }
}
