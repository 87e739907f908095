/// Kanji mode decoder (Mode 1000)
/// Each 13-bit value is a compacted Shift-JIS double-byte code.
use encoding_rs::SHIFT_JIS;

use crate::decoder::segments::{BitReader, SegmentError};

pub struct KanjiDecoder;

impl KanjiDecoder {
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Result<String, SegmentError> {
        let mut text = String::with_capacity(character_count * 3);

        for _ in 0..character_count {
            let value = reader.read(13)? as u16;
            let code = Self::shift_jis_code(value).to_be_bytes();
            let character = SHIFT_JIS
                .decode_without_bom_handling_and_without_replacement(&code)
                .ok_or(SegmentError::InvalidKanji(value))?;
            text.push_str(&character);
        }

        Ok(text)
    }

    /// Expand a 13-bit value into the 0x8140-0x9FFC or 0xE040-0xEBBF range.
    fn shift_jis_code(value: u16) -> u16 {
        let compact = ((value / 0xC0) << 8) | (value % 0xC0);
        if compact < 0x1F00 {
            compact + 0x8140
        } else {
            compact + 0xC140
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_jis_code() {
        assert_eq!(KanjiDecoder::shift_jis_code(0x0D9F), 0x935F);
        assert_eq!(KanjiDecoder::shift_jis_code(0x1AAA), 0xE4AA);
        assert_eq!(KanjiDecoder::shift_jis_code(0), 0x8140);
    }

    #[test]
    fn test_kanji_decode() {
        // 0x0D9F and 0x1AAA packed as two 13-bit values
        let bytes = [0b0110_1100, 0b1111_1110, 0b1010_1010, 0b1000_0000];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(KanjiDecoder::decode(&mut reader, 2), Ok("点茗".to_string()));
    }

    #[test]
    fn test_invalid_value_is_reported() {
        // 0x0D9F is valid; 0x003F expands to 0x817F, which has no character
        let bytes = [0x6C, 0xF8, 0x0F, 0xC0];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(
            KanjiDecoder::decode(&mut reader, 2),
            Err(SegmentError::InvalidKanji(0x003F))
        );
    }
}
