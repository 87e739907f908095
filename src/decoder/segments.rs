//! Data segment parsing: mode indicators, character counts and text.

use thiserror::Error;

use super::modes::alphanumeric::AlphanumericDecoder;
use super::modes::byte::{ByteDecoder, CharacterSet};
use super::modes::kanji::KanjiDecoder;
use super::modes::numeric::NumericDecoder;
use crate::models::{DataSegment, SegmentMode, Version};

/// Why a data stream could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("stream ended inside a segment")]
    UnexpectedEnd,
    #[error("unknown mode indicator {0:#06b}")]
    UnknownMode(u8),
    #[error("numeric group {0} out of range")]
    InvalidNumeric(u16),
    #[error("alphanumeric value {0} out of range")]
    InvalidAlphanumeric(u16),
    #[error("kanji value {0:#06x} is not a Shift-JIS character")]
    InvalidKanji(u16),
    #[error("malformed ECI designator")]
    InvalidEci,
}

/// MSB-first reader over data codewords.
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Bits not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.position
    }

    /// Read `count` (at most 32) bits as an unsigned value.
    pub fn read(&mut self, count: usize) -> Result<u32, SegmentError> {
        if count > 32 || count > self.remaining() {
            return Err(SegmentError::UnexpectedEnd);
        }
        let mut value = 0u32;
        for _ in 0..count {
            let byte = self.bytes[self.position / 8];
            let bit = (byte >> (7 - self.position % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.position += 1;
        }
        Ok(value)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), SegmentError> {
        if count > self.remaining() {
            return Err(SegmentError::UnexpectedEnd);
        }
        self.position += count;
        Ok(())
    }
}

/// Width of the character count field for a mode at a version.
pub fn character_count_bits(mode: SegmentMode, version: Version) -> usize {
    let range = match version.number() {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    let widths = match mode {
        SegmentMode::Numeric => [10, 12, 14],
        SegmentMode::Alphanumeric => [9, 11, 13],
        SegmentMode::Byte => [8, 16, 16],
        SegmentMode::Kanji => [8, 10, 12],
    };
    widths[range]
}

/// ECI designator: 1, 2 or 3 bytes selected by the leading bits.
fn read_eci(reader: &mut BitReader<'_>) -> Result<u32, SegmentError> {
    let first = reader.read(8)?;
    if first & 0x80 == 0 {
        Ok(first & 0x7F)
    } else if first & 0xC0 == 0x80 {
        Ok(((first & 0x3F) << 8) | reader.read(8)?)
    } else if first & 0xE0 == 0xC0 {
        Ok(((first & 0x1F) << 16) | reader.read(16)?)
    } else {
        Err(SegmentError::InvalidEci)
    }
}

/// Parse the corrected data codewords into text segments, in stream order.
///
/// Parsing stops at the terminator or when fewer than four bits remain;
/// ECI, structured append and FNC1 headers carry no text.
pub fn parse_segments(data: &[u8], version: Version) -> Result<Vec<DataSegment>, SegmentError> {
    let mut reader = BitReader::new(data);
    let mut segments = Vec::new();
    let mut charset = CharacterSet::Auto;

    while reader.remaining() >= 4 {
        let indicator = reader.read(4)? as u8;
        let mode = match indicator {
            0b0000 => break,
            0b0001 => SegmentMode::Numeric,
            0b0010 => SegmentMode::Alphanumeric,
            0b0100 => SegmentMode::Byte,
            0b1000 => SegmentMode::Kanji,
            0b0111 => {
                charset = CharacterSet::from_eci(read_eci(&mut reader)?).unwrap_or(charset);
                continue;
            }
            // structured append: sequence indicator and parity
            0b0011 => {
                reader.skip(16)?;
                continue;
            }
            0b0101 => continue,
            // FNC1 second position: application indicator
            0b1001 => {
                reader.skip(8)?;
                continue;
            }
            other => return Err(SegmentError::UnknownMode(other)),
        };

        let count = reader.read(character_count_bits(mode, version))? as usize;
        let text = match mode {
            SegmentMode::Numeric => NumericDecoder::decode(&mut reader, count)?,
            SegmentMode::Alphanumeric => AlphanumericDecoder::decode(&mut reader, count)?,
            SegmentMode::Byte => ByteDecoder::decode(&mut reader, count, charset)?,
            SegmentMode::Kanji => KanjiDecoder::decode(&mut reader, count)?,
        };
        segments.push(DataSegment { mode, text });
    }

    Ok(segments)
}
