use super::Point;

/// QR symbol version (1-40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version number
    pub const MIN: u8 = 1;
    /// Largest version number
    pub const MAX: u8 = 40;

    /// Version from its number, `None` outside 1-40.
    pub fn new(number: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&number).then_some(Self(number))
    }

    /// Version whose grid side is `dimension` modules.
    pub fn from_dimension(dimension: usize) -> Option<Self> {
        if dimension < 21 || (dimension - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((dimension - 17) / 4).ok().and_then(Self::new)
    }

    /// Version number (1-40)
    pub fn number(self) -> u8 {
        self.0
    }

    /// Grid side length in modules
    pub fn dimension(self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Versions 7 and up carry two version-information blocks.
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels in table order.
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Level from the two format-information bits (01=L, 00=M, 11=Q, 10=H).
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// The two bits this level occupies in format information.
    pub fn format_bits(self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Row index into the block tables (L=0 .. H=3).
    pub fn table_index(self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// Mask pattern from its three format bits.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => MaskPattern::Pattern0,
            1 => MaskPattern::Pattern1,
            2 => MaskPattern::Pattern2,
            3 => MaskPattern::Pattern3,
            4 => MaskPattern::Pattern4,
            5 => MaskPattern::Pattern5,
            6 => MaskPattern::Pattern6,
            _ => MaskPattern::Pattern7,
        }
    }

    /// Pattern id (0-7)
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the module at row `i`, column `j` is inverted by this mask.
    pub fn is_masked(self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => (i * j) % 2 + (i * j) % 3 == 0,
            MaskPattern::Pattern6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        }
    }
}

/// Text-bearing data segment modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentMode {
    /// Digits, 3 per 10 bits
    Numeric,
    /// 45-character set, 2 per 11 bits
    Alphanumeric,
    /// 8-bit bytes
    Byte,
    /// Shift-JIS double-byte characters, 1 per 13 bits
    Kanji,
}

/// One decoded text fragment and the mode it was packed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSegment {
    /// Mode indicator the fragment was read with
    pub mode: SegmentMode,
    /// Decoded text
    pub text: String,
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl BoundingBox {
    /// Smallest box covering `points`, clamped to an image of the given size.
    ///
    /// Non-finite points are ignored. Returns `None` when nothing finite remains
    /// or the clamped box is empty.
    pub fn from_points(points: &[Point], image_width: u32, image_height: u32) -> Option<Self> {
        let finite = points.iter().filter(|p| p.is_finite());
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in finite {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return None;
        }

        let left = clamp_coordinate(min_x.floor(), image_width);
        let top = clamp_coordinate(min_y.floor(), image_height);
        let right = clamp_coordinate(max_x.ceil(), image_width);
        let bottom = clamp_coordinate(max_y.ceil(), image_height);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// True when the two boxes share at least one pixel.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

impl From<BoundingBox> for (u32, u32, u32, u32) {
    fn from(b: BoundingBox) -> Self {
        (b.x, b.y, b.width, b.height)
    }
}

fn clamp_coordinate(value: f32, max: u32) -> u32 {
    if value <= 0.0 {
        0
    } else if value >= max as f32 {
        max
    } else {
        value as u32
    }
}

/// A successfully decoded QR symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSymbol {
    /// Concatenated text of all segments
    pub text: String,
    /// Segments in stream order
    pub segments: Vec<DataSegment>,
    /// Error-corrected data codewords
    pub data_codewords: Vec<u8>,
    /// Symbol version
    pub version: Version,
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask that was removed
    pub mask: MaskPattern,
    /// Outer corners (top-left, top-right, bottom-right, bottom-left) in image coordinates
    pub corners: [Point; 4],
}

impl DecodedSymbol {
    /// Axis-aligned box enclosing the symbol, clamped to the image.
    pub fn bounding_box(&self, image_width: u32, image_height: u32) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.corners, image_width, image_height)
    }

    /// Map corners from a resampled image back to the source image.
    pub(crate) fn unscale(mut self, scale_x: f32, scale_y: f32) -> Self {
        for corner in &mut self.corners {
            *corner = corner.scaled(1.0 / scale_x, 1.0 / scale_y);
        }
        self
    }
}

/// Text and bounding box of one symbol, as returned by the `_with_bbox` entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Decoded text
    pub content: String,
    /// Enclosing box in source image coordinates
    pub bbox: BoundingBox,
}
