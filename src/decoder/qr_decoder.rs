/// Main QR code decoder - wires everything together
use crate::decoder::bitstream::BitstreamExtractor;
use crate::decoder::blocks::correct_blocks;
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::segments::parse_segments;
use crate::decoder::tables::ec_block_info;
use crate::decoder::unmask::unmask;
use crate::decoder::version::VersionInfo;
use crate::detector::grouping::SymbolCandidate;
use crate::detector::sampler::{grid_transforms, sample_grid, symbol_corners};
use crate::error::CandidateError;
use crate::models::{BitMatrix, DataSegment, DecodedSymbol, ECLevel, MaskPattern, Version};

/// Contents of a module grid, before it is placed in the image.
#[derive(Debug, Clone, PartialEq)]
pub struct GridContents {
    pub segments: Vec<DataSegment>,
    pub data_codewords: Vec<u8>,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
    /// Codewords repaired by Reed-Solomon
    pub corrected: usize,
}

impl GridContents {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Main QR decoder that processes a detected QR region
pub struct QrDecoder;

impl QrDecoder {
    /// Decode a sampled module grid of the given version.
    pub(crate) fn decode_grid(
        grid: &BitMatrix,
        version: Version,
    ) -> Result<GridContents, CandidateError> {
        if grid.width() != version.dimension() || grid.height() != version.dimension() {
            return Err(CandidateError::Geometry);
        }

        let format = FormatInfo::extract(grid)?;
        VersionInfo::verify(grid, version)?;

        let func = FunctionMask::new(version);
        let mut unmasked = grid.clone();
        unmask(&mut unmasked, format.mask, &func);

        let bits = BitstreamExtractor::extract(&unmasked, &func);
        let info = ec_block_info(version, format.ec_level);
        let codewords = BitstreamExtractor::codewords(&bits, info.total_codewords);
        let (data_codewords, corrected) = correct_blocks(&codewords, &info)?;
        let segments = parse_segments(&data_codewords, version)?;

        Ok(GridContents {
            segments,
            data_codewords,
            ec_level: format.ec_level,
            mask: format.mask,
            corrected,
        })
    }

    /// Decode one finder triple.
    ///
    /// The version implied by the finder spacing is tried first, then its
    /// neighbours; a clean version-information read naming another version
    /// queues that version too. Each version is sampled through every
    /// available transform before moving on.
    pub(crate) fn decode_candidate(
        matrix: &BitMatrix,
        candidate: &SymbolCandidate,
    ) -> Result<DecodedSymbol, CandidateError> {
        let estimate = candidate.version.number();
        let mut queue: Vec<u8> = vec![estimate, estimate.saturating_sub(1), estimate + 1];
        let mut tried: Vec<u8> = Vec::new();
        let mut last_error = CandidateError::Geometry;

        let mut next = 0;
        while next < queue.len() {
            let number = queue[next];
            next += 1;
            let Some(version) = Version::new(number) else {
                continue;
            };
            if tried.contains(&number) {
                continue;
            }
            tried.push(number);

            let dimension = version.dimension();
            for transform in grid_transforms(matrix, candidate, version) {
                let grid = match sample_grid(matrix, &transform, dimension, candidate.module_size) {
                    Ok(grid) => grid,
                    Err(err) => {
                        last_error = err;
                        continue;
                    }
                };
                match Self::decode_grid(&grid, version) {
                    Ok(contents) => {
                        return Ok(DecodedSymbol {
                            text: contents.text(),
                            segments: contents.segments,
                            data_codewords: contents.data_codewords,
                            version,
                            ec_level: contents.ec_level,
                            mask: contents.mask,
                            corners: symbol_corners(&transform, dimension),
                        });
                    }
                    Err(CandidateError::VersionMismatch { found, .. }) => {
                        last_error = CandidateError::VersionMismatch {
                            expected: number,
                            found,
                        };
                        queue.push(found);
                    }
                    Err(err) => last_error = err,
                }
            }
        }

        Err(last_error)
    }
}
