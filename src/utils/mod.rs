//! Image helpers shared by the detector and the pipeline
//!
//! - Binarization (hybrid local/global and plain Otsu)
//! - Geometry (perspective transforms, angles)
//! - Resampling for the resize retry

pub mod binarization;
pub mod geometry;
pub mod resize;
