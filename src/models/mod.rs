pub mod grayscale;
pub mod matrix;
pub mod point;
pub mod symbol;

pub use grayscale::GrayscaleImage;
pub use matrix::BitMatrix;
pub use point::Point;
pub use symbol::{
    BoundingBox, DataSegment, DecodedSymbol, Detection, ECLevel, MaskPattern, SegmentMode,
    Version,
};
