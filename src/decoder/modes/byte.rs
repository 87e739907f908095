/// Byte mode decoder (Mode 0100) for 8-bit data
use encoding_rs::SHIFT_JIS;

use crate::decoder::segments::{BitReader, SegmentError};

/// Character set byte segments are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    /// No ECI seen: UTF-8 when the bytes are valid UTF-8, else ISO-8859-1
    Auto,
    Utf8,
    Latin1,
    ShiftJis,
}

impl CharacterSet {
    /// Character set for an ECI assignment number, `None` if unsupported.
    pub fn from_eci(designator: u32) -> Option<Self> {
        match designator {
            1 | 3 => Some(CharacterSet::Latin1),
            20 => Some(CharacterSet::ShiftJis),
            26 => Some(CharacterSet::Utf8),
            _ => None,
        }
    }

    pub fn decode(self, bytes: Vec<u8>) -> String {
        match self {
            CharacterSet::Auto => {
                String::from_utf8(bytes).unwrap_or_else(|err| latin1(err.as_bytes()))
            }
            CharacterSet::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
            CharacterSet::Latin1 => latin1(&bytes),
            CharacterSet::ShiftJis => SHIFT_JIS.decode_without_bom_handling(&bytes).0.into_owned(),
        }
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Decode byte mode data (8 bits per character)
pub struct ByteDecoder;

impl ByteDecoder {
    pub fn decode(
        reader: &mut BitReader<'_>,
        character_count: usize,
        charset: CharacterSet,
    ) -> Result<String, SegmentError> {
        let mut bytes = Vec::with_capacity(character_count);
        for _ in 0..character_count {
            bytes.push(reader.read(8)? as u8);
        }
        Ok(charset.decode(bytes))
    }
}
