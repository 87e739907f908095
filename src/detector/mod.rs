//! QR code detection modules
//!
//! Locating symbols in a binarized image:
//! - Finder pattern detection (the three square markers)
//! - Grouping finder patterns into symbol candidates
//! - Alignment pattern search (versions 2+)
//! - Module grid sampling through a perspective transform

/// Alignment pattern search for QR versions 2+
pub mod alignment;
/// Finder pattern detection using 1:1:3:1:1 ratio scanning
pub mod finder;
/// Finder pattern triples
pub mod grouping;
/// Perspective transforms and module sampling
pub mod sampler;
