/// Numeric mode decoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::decoder::segments::{BitReader, SegmentError};

pub struct NumericDecoder;

impl NumericDecoder {
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Result<String, SegmentError> {
        let mut result = String::with_capacity(character_count);
        let mut remaining = character_count;

        while remaining > 0 {
            let digits = remaining.min(3);
            let (width, limit) = match digits {
                3 => (10, 1000),
                2 => (7, 100),
                _ => (4, 10),
            };
            let value = reader.read(width)? as u16;
            if value >= limit {
                return Err(SegmentError::InvalidNumeric(value));
            }
            result.push_str(&format!("{value:0digits$}"));
            remaining -= digits;
        }

        Ok(result)
    }
}
