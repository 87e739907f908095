//! One detect-and-decode pass over an image, and the resize retry around it.

use tracing::{debug, trace};

use crate::config::DecodeOptions;
use crate::decoder::qr_decoder::QrDecoder;
use crate::detector::finder::{FinderDetector, FinderPattern};
use crate::detector::grouping::group_finder_patterns;
use crate::models::{BitMatrix, DecodedSymbol, GrayscaleImage};
use crate::utils::binarization::{hybrid_binarize, otsu_binarize};
use crate::utils::resize::{rescale, resize_factors};

/// Counters for one pass, reported through `tracing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassTelemetry {
    /// Confirmed finder patterns
    pub finder_patterns: usize,
    /// Ranked finder triples
    pub groups: usize,
    /// Triples handed to the decoder
    pub attempts: usize,
    /// Symbols decoded
    pub decoded: usize,
}

/// Decode every symbol in `image`, retrying on rescaled copies when allowed.
pub fn decode_with_options(image: &GrayscaleImage, options: &DecodeOptions) -> Vec<DecodedSymbol> {
    let (width, height) = (image.width(), image.height());
    let symbols = decode_pass(image, options.max_groups);
    debug!(width, height, symbols = symbols.len(), "baseline pass");
    if !symbols.is_empty() || !options.auto_resize {
        return symbols;
    }

    for factor in resize_factors(width, height, options) {
        let Some(scaled) = rescale(image, factor) else {
            continue;
        };
        let found = decode_pass(&scaled.image, options.max_groups);
        debug!(
            factor,
            width = scaled.image.width(),
            height = scaled.image.height(),
            symbols = found.len(),
            "resize pass"
        );
        if !found.is_empty() {
            return found
                .into_iter()
                .map(|symbol| symbol.unscale(scaled.scale_x, scaled.scale_y))
                .filter(|symbol| symbol.bounding_box(width, height).is_some())
                .collect();
        }
    }

    Vec::new()
}

/// Hybrid binarization first; the plain Otsu bitmap only when that finds nothing.
pub(crate) fn decode_pass(image: &GrayscaleImage, max_groups: usize) -> Vec<DecodedSymbol> {
    let (symbols, telemetry) = decode_binary(&hybrid_binarize(image), image, max_groups);
    debug!(?telemetry, "hybrid binarization");
    if !symbols.is_empty() {
        return symbols;
    }

    let (symbols, telemetry) = decode_binary(&otsu_binarize(image), image, max_groups);
    debug!(?telemetry, "otsu binarization");
    symbols
}

fn decode_binary(
    binary: &BitMatrix,
    image: &GrayscaleImage,
    max_groups: usize,
) -> (Vec<DecodedSymbol>, PassTelemetry) {
    let finder_patterns = FinderDetector::detect(binary);
    let (symbols, mut telemetry) = decode_groups(binary, &finder_patterns, max_groups);
    telemetry.finder_patterns = finder_patterns.len();

    let symbols: Vec<DecodedSymbol> = symbols
        .into_iter()
        .filter(|symbol| symbol.bounding_box(image.width(), image.height()).is_some())
        .collect();
    telemetry.decoded = symbols.len();
    (symbols, telemetry)
}

/// Walk the ranked triples, skipping any that reuse a decoded symbol's patterns.
pub(crate) fn decode_groups(
    binary: &BitMatrix,
    finder_patterns: &[FinderPattern],
    max_groups: usize,
) -> (Vec<DecodedSymbol>, PassTelemetry) {
    let mut telemetry = PassTelemetry::default();
    let mut results = Vec::new();
    let mut used: Vec<usize> = Vec::new();

    let groups = group_finder_patterns(finder_patterns);
    telemetry.groups = groups.len();

    for candidate in &groups {
        if candidate.shares_pattern(&used) {
            continue;
        }
        if telemetry.attempts >= max_groups {
            break;
        }
        telemetry.attempts += 1;

        match QrDecoder::decode_candidate(binary, candidate) {
            Ok(symbol) => {
                trace!(patterns = ?candidate.patterns, version = symbol.version.number(), "decoded");
                used.extend_from_slice(&candidate.patterns);
                results.push(symbol);
            }
            Err(err) => {
                trace!(patterns = ?candidate.patterns, error = %err, "candidate dropped");
            }
        }
    }

    (results, telemetry)
}
