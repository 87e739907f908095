//! Decode tunables and their `QRLYZER_*` environment overrides.

use std::sync::OnceLock;

/// Smallest longer side the resize retry scales an image to.
pub const DEFAULT_MIN_TARGET_DIMENSION: f32 = 100.0;
/// Largest longer side the resize retry scales an image to.
pub const DEFAULT_MAX_TARGET_DIMENSION: f32 = 1280.0;
/// Number of intervals between the smallest and largest resize target.
pub const DEFAULT_RESIZE_STEPS: u32 = 5;
/// Symbol candidates attempted per pass.
pub const DEFAULT_MAX_GROUPS: usize = 40;

/// Options for one `decode` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Rerun the pipeline on rescaled copies when a pass finds nothing
    pub auto_resize: bool,
    /// Target longer side for the smallest resize factor
    pub min_target_dimension: f32,
    /// Target longer side for the largest resize factor
    pub max_target_dimension: f32,
    /// Intervals between the two targets (factors tried = steps + 1)
    pub resize_steps: u32,
    /// Cap on symbol candidates attempted per pass
    pub max_groups: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            auto_resize: false,
            min_target_dimension: DEFAULT_MIN_TARGET_DIMENSION,
            max_target_dimension: DEFAULT_MAX_TARGET_DIMENSION,
            resize_steps: DEFAULT_RESIZE_STEPS,
            max_groups: DEFAULT_MAX_GROUPS,
        }
    }
}

impl DecodeOptions {
    /// Defaults with any `QRLYZER_*` overrides applied.
    ///
    /// The environment is read once per process; unparsable values keep the default.
    pub fn from_env() -> Self {
        static ENV_OPTIONS: OnceLock<DecodeOptions> = OnceLock::new();
        ENV_OPTIONS
            .get_or_init(|| options_from_lookup(|name| std::env::var(name).ok()))
            .clone()
    }

    /// Set `auto_resize`.
    pub fn with_auto_resize(mut self, auto_resize: bool) -> Self {
        self.auto_resize = auto_resize;
        self
    }
}

fn parse_positive_f32(value: Option<String>, default: f32) -> f32 {
    value
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

fn parse_u32(value: Option<String>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_usize(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn options_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DecodeOptions {
    let mut min_target = parse_positive_f32(
        lookup("QRLYZER_MIN_TARGET_DIMENSION"),
        DEFAULT_MIN_TARGET_DIMENSION,
    );
    let mut max_target = parse_positive_f32(
        lookup("QRLYZER_MAX_TARGET_DIMENSION"),
        DEFAULT_MAX_TARGET_DIMENSION,
    );
    if min_target > max_target {
        std::mem::swap(&mut min_target, &mut max_target);
    }
    DecodeOptions {
        auto_resize: false,
        min_target_dimension: min_target,
        max_target_dimension: max_target,
        resize_steps: parse_u32(lookup("QRLYZER_RESIZE_STEPS"), DEFAULT_RESIZE_STEPS).clamp(1, 64),
        max_groups: parse_usize(lookup("QRLYZER_MAX_GROUPS"), DEFAULT_MAX_GROUPS).max(1),
    }
}
