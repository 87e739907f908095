/// BCH codes protecting QR format and version information
///
/// Both codes are short enough that decoding is a nearest-codeword search
/// over every valid codeword.

/// Format information generator, x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0x537;
/// Format codewords are XORed with this so that no valid one is all zero.
pub const FORMAT_MASK: u32 = 0x5412;
/// Version information generator, x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_GENERATOR: u32 = 0x1F25;
/// Largest Hamming distance still treated as a correctable read.
pub const MAX_CORRECTABLE: u32 = 3;

/// Remainder of `data * x^degree(generator)` divided by `generator` over GF(2).
pub fn remainder(data: u32, generator: u32) -> u32 {
    let degree = 31 - generator.leading_zeros();
    let mut value = data << degree;
    while value != 0 && 31 - value.leading_zeros() >= degree {
        let shift = (31 - value.leading_zeros()) - degree;
        value ^= generator << shift;
    }
    value
}

/// Format codeword for 5 data bits (2 EC level bits, 3 mask bits).
pub fn format_codeword(data: u8) -> u16 {
    let data = (data & 0x1F) as u32;
    (((data << 10) | remainder(data, FORMAT_GENERATOR)) ^ FORMAT_MASK) as u16
}

/// Version codeword (18 bits) for versions 7-40.
pub fn version_codeword(version: u8) -> u32 {
    let data = version as u32;
    (data << 12) | remainder(data, VERSION_GENERATOR)
}

pub struct BchDecoder;

impl BchDecoder {
    /// Nearest format data bits to a 15-bit read, if within three bit errors.
    pub fn decode_format(read: u16) -> Option<u8> {
        Self::nearest((0u8..32).map(|data| (data, format_codeword(data) as u32)), read as u32)
    }

    /// Nearest version number to an 18-bit read, if within three bit errors.
    pub fn decode_version(read: u32) -> Option<u8> {
        Self::nearest((7u8..=40).map(|v| (v, version_codeword(v))), read)
    }

    fn nearest(codewords: impl Iterator<Item = (u8, u32)>, read: u32) -> Option<u8> {
        let mut best: Option<(u32, u8)> = None;
        for (data, codeword) in codewords {
            let distance = (codeword ^ read).count_ones();
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, data));
            }
        }
        best.filter(|(d, _)| *d <= MAX_CORRECTABLE).map(|(_, data)| data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_format_codewords() {
        // L (01) mask 0, M (00) mask 2, H (10) mask 7
        assert_eq!(format_codeword(0b01_000), 0x77C4);
        assert_eq!(format_codeword(0b00_010), 0x5E7C);
        assert_eq!(format_codeword(0b10_111), 0x083B);
    }

    #[test]
    fn test_known_version_codewords() {
        assert_eq!(version_codeword(7), 0x07C94);
        assert_eq!(version_codeword(40), 0x28C69);
    }

    #[test]
    fn test_format_decode_corrects_three_errors() {
        let clean = format_codeword(0b11_101);
        assert_eq!(BchDecoder::decode_format(clean), Some(0b11_101));
        let damaged = clean ^ 0b100_0000_0100_0001;
        assert_eq!(BchDecoder::decode_format(damaged), Some(0b11_101));
    }

    #[test]
    fn test_version_decode() {
        let clean = version_codeword(23);
        assert_eq!(BchDecoder::decode_version(clean), Some(23));
        assert_eq!(BchDecoder::decode_version(clean ^ 0b1000_0000_0001_0010), Some(23));
        // the all-zero read is more than three bits from every codeword
        assert_eq!(BchDecoder::decode_version(0), None);
    }
}
