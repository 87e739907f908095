/// Alphanumeric mode decoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::decoder::segments::{BitReader, SegmentError};

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Result<String, SegmentError> {
        let mut result = String::with_capacity(character_count);

        for _ in 0..character_count / 2 {
            let value = reader.read(11)? as u16;
            if value >= 45 * 45 {
                return Err(SegmentError::InvalidAlphanumeric(value));
            }
            result.push(ALPHANUMERIC_TABLE[(value / 45) as usize]);
            result.push(ALPHANUMERIC_TABLE[(value % 45) as usize]);
        }
        if character_count % 2 == 1 {
            let value = reader.read(6)? as u16;
            let c = ALPHANUMERIC_TABLE
                .get(value as usize)
                .ok_or(SegmentError::InvalidAlphanumeric(value))?;
            result.push(*c);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_pair_and_single() {
        // "HE" = 17*45 + 14 = 779, then "L" = 21
        let bytes = [0b0110_0001, 0b0110_1010, 0b1000_0000];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(AlphanumericDecoder::decode(&mut reader, 3), Ok("HEL".to_string()));
    }

    #[test]
    fn test_rejects_values_outside_table() {
        // single character value 45
        let bytes = [0b1011_0100];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(
            AlphanumericDecoder::decode(&mut reader, 1),
            Err(SegmentError::InvalidAlphanumeric(45))
        );

        // pair value 2025
        let bytes = [0b1111_1101, 0b0010_0000];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(
            AlphanumericDecoder::decode(&mut reader, 2),
            Err(SegmentError::InvalidAlphanumeric(2025))
        );
    }
}
