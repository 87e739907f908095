//! Splitting interleaved codewords into error correction blocks.

use super::reed_solomon::ReedSolomonDecoder;
use super::tables::EcBlockInfo;
use crate::error::CandidateError;

/// Undo the interleaving. Each returned block is its data codewords
/// followed by its ECC codewords; short blocks come first.
pub fn deinterleave(codewords: &[u8], info: &EcBlockInfo) -> Vec<Vec<u8>> {
    let num_blocks = info.num_blocks;
    let short_blocks = info.short_blocks();
    let short_data = info.short_block_len() - info.ecc_per_block;

    let mut blocks: Vec<Vec<u8>> = (0..num_blocks)
        .map(|b| Vec::with_capacity(info.short_block_len() + usize::from(b >= short_blocks)))
        .collect();
    let mut stream = codewords.iter().copied();

    // data rounds; the last one only feeds the long blocks
    for round in 0..=short_data {
        for (b, block) in blocks.iter_mut().enumerate() {
            if round == short_data && b < short_blocks {
                continue;
            }
            if let Some(codeword) = stream.next() {
                block.push(codeword);
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            if let Some(codeword) = stream.next() {
                block.push(codeword);
            }
        }
    }

    blocks
}

/// Deinterleave, correct every block and concatenate the data codewords.
pub(crate) fn correct_blocks(
    codewords: &[u8],
    info: &EcBlockInfo,
) -> Result<(Vec<u8>, usize), CandidateError> {
    let decoder = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data = Vec::with_capacity(info.data_codewords());
    let mut corrected = 0usize;

    for (index, mut block) in deinterleave(codewords, info).into_iter().enumerate() {
        corrected += decoder
            .correct(&mut block)
            .ok_or(CandidateError::Ecc { block: index })?;
        let data_len = block.len() - info.ecc_per_block;
        data.extend_from_slice(&block[..data_len]);
    }

    Ok((data, corrected))
}
