//! QR code decoding modules
//!
//! This module contains all the logic for decoding a sampled module grid:
//! - Format and version information (BCH)
//! - Unmasking and codeword placement
//! - Block de-interleaving and Reed-Solomon correction
//! - Data segments (numeric, alphanumeric, byte, kanji, ECI)

/// BCH codes protecting format and version info
pub mod bch;
/// Bitstream extraction from QR matrix
pub mod bitstream;
/// Codeword de-interleaving and per-block correction
pub mod blocks;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Data mode decoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Mode indicators, character counts and segment text
pub mod segments;
/// QR specification tables (ECC codewords/blocks, alignment positions)
pub mod tables;
/// QR code unmasking (removes mask patterns)
pub mod unmask;
/// Version information extraction (versions 7-40)
pub mod version;
