//! Error types.
//!
//! `QrError` covers caller input problems and is the only failure that leaves
//! the public API. `CandidateError` describes why a single symbol candidate was
//! dropped; it is logged and discarded inside the pipeline.

use std::path::PathBuf;
use thiserror::Error;

use crate::decoder::segments::SegmentError;

/// Errors surfaced to callers before any decoding work happens.
#[derive(Debug, Error)]
pub enum QrError {
    /// Pixel buffer length does not match `width * height`.
    #[error("pixel buffer holds {actual} bytes but a single-channel image needs {expected}")]
    BufferSize {
        /// Bytes required for the stated dimensions.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },
    /// Image has a zero dimension.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage {
        /// Stated width.
        width: u32,
        /// Stated height.
        height: u32,
    },
    /// The image file could not be opened or decoded.
    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying container or I/O error.
        #[source]
        source: image::ImageError,
    },
}

/// Result alias for the public API.
pub type Result<T> = std::result::Result<T, QrError>;

/// Reason a symbol candidate produced no decoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum CandidateError {
    #[error("finder pattern geometry does not describe a symbol")]
    Geometry,
    #[error("sampling grid falls outside the image")]
    OutOfBounds,
    #[error("format information unreadable or copies disagree")]
    FormatInfo,
    #[error("version information unreadable or copies disagree")]
    VersionInfo,
    #[error("version information reads {found}, grid implies {expected}")]
    VersionMismatch { expected: u8, found: u8 },
    #[error("block {block} has more errors than its correction capacity")]
    Ecc { block: usize },
    #[error("malformed data segment: {0}")]
    Segment(#[from] SegmentError),
}
