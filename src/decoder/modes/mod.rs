//! QR code data mode decoders
//!
//! One decoder per text-bearing mode:
//! - Numeric: digits, three per 10 bits
//! - Alphanumeric: 45-character set, two per 11 bits
//! - Byte: 8-bit data (UTF-8, ISO-8859-1 or Shift-JIS)
//! - Kanji: Shift-JIS double-byte characters, one per 13 bits

pub mod alphanumeric;
pub mod byte;
pub mod kanji;
pub mod numeric;
