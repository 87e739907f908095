/// Finder pattern triples that can be the three corners of one symbol
use super::finder::FinderPattern;
use crate::models::{Point, Version};
use crate::utils::geometry::corner_cosine;

/// Largest ratio between module sizes in a triple. Perspective makes the
/// pattern nearest the viewer look much larger than the farthest one.
const MAX_SIZE_RATIO: f32 = 2.5;
/// Largest ratio between the two leg lengths.
const MAX_LEG_RATIO: f32 = 2.0;
/// |cos| at the corner must be below this (about 72.5 to 107.5 degrees).
const MAX_CORNER_COSINE: f32 = 0.3;
/// Shortest leg, in module sizes. A version-1 leg is 14 modules.
const MIN_LEG_MODULES: f32 = 12.0;
/// Only the most-confirmed patterns take part in grouping.
const MAX_GROUPED_PATTERNS: usize = 48;

/// Three finder patterns arranged as top-left, top-right and bottom-left.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolCandidate {
    /// Indices into the detected pattern list
    pub patterns: [usize; 3],
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    /// Mean module size of the three patterns
    pub module_size: f32,
    /// Module sizes at the top-left, top-right and bottom-left patterns
    pub corner_module_sizes: [f32; 3],
    /// Version implied by the leg lengths
    pub version: Version,
    /// Lower is better
    pub score: f32,
}

impl SymbolCandidate {
    pub fn shares_pattern(&self, used: &[usize]) -> bool {
        self.patterns.iter().any(|p| used.contains(p))
    }
}

/// Unrounded version for a leg measured in the leg's own module size.
fn version_from_leg(leg: f32, module_size: f32) -> f32 {
    (leg / module_size - 10.0) / 4.0
}

/// Every plausible triple, best score first. Ties keep enumeration order.
pub fn group_finder_patterns(patterns: &[FinderPattern]) -> Vec<SymbolCandidate> {
    if patterns.len() < 3 {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..patterns.len()).collect();
    if indices.len() > MAX_GROUPED_PATTERNS {
        indices.sort_by(|&a, &b| patterns[b].count.cmp(&patterns[a].count));
        indices.truncate(MAX_GROUPED_PATTERNS);
        indices.sort_unstable();
    }

    let mut candidates = Vec::new();
    for (a, &i) in indices.iter().enumerate() {
        for (b, &j) in indices.iter().enumerate().skip(a + 1) {
            for &k in indices.iter().skip(b + 1) {
                if let Some(candidate) = classify([i, j, k], patterns) {
                    candidates.push(candidate);
                }
            }
        }
    }

    candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
    candidates
}

fn classify(ids: [usize; 3], patterns: &[FinderPattern]) -> Option<SymbolCandidate> {
    let triple = ids.map(|i| &patterns[i]);

    let sizes = triple.map(|p| p.module_size);
    let smallest = sizes.iter().copied().fold(f32::INFINITY, f32::min);
    let largest = sizes.iter().copied().fold(0.0f32, f32::max);
    if smallest <= 0.0 {
        return None;
    }
    let size_ratio = largest / smallest;
    if size_ratio > MAX_SIZE_RATIO {
        return None;
    }

    // the corner closest to a right angle is the top-left pattern
    let mut best: Option<(f32, usize)> = None;
    for c in 0..3 {
        let corner = &triple[c].center;
        let a = &triple[(c + 1) % 3].center;
        let b = &triple[(c + 2) % 3].center;
        if let Some(cos) = corner_cosine(corner, a, b) {
            if best.is_none_or(|(best_cos, _)| cos < best_cos) {
                best = Some((cos, c));
            }
        }
    }
    let (cosine, c) = best?;
    if cosine >= MAX_CORNER_COSINE {
        return None;
    }

    let tl = c;
    let (p1, p2) = ((c + 1) % 3, (c + 2) % 3);
    // image y grows downward, so a positive cross product is clockwise
    let clockwise = triple[tl]
        .center
        .to(&triple[p1].center)
        .cross(&triple[tl].center.to(&triple[p2].center))
        > 0.0;
    let (tr, bl) = if clockwise { (p1, p2) } else { (p2, p1) };
    let (top_left, top_right, bottom_left) =
        (triple[tl].center, triple[tr].center, triple[bl].center);

    let leg_a = top_left.distance(&top_right);
    let leg_b = top_left.distance(&bottom_left);
    let leg_ratio = leg_a.max(leg_b) / leg_a.min(leg_b);
    if leg_ratio > MAX_LEG_RATIO {
        return None;
    }

    // each leg is measured in the mean module size of its two ends
    let size_a = (sizes[tl] + sizes[tr]) / 2.0;
    let size_b = (sizes[tl] + sizes[bl]) / 2.0;
    if leg_a < MIN_LEG_MODULES * size_a || leg_b < MIN_LEG_MODULES * size_b {
        return None;
    }

    let va = version_from_leg(leg_a, size_a);
    let vb = version_from_leg(leg_b, size_b);
    let range = Version::MIN as i32..=Version::MAX as i32;
    let (ra, rb) = (va.round() as i32, vb.round() as i32);
    if !range.contains(&ra) || !range.contains(&rb) || (ra - rb).abs() > 1 {
        return None;
    }
    let estimate = ((va + vb) / 2.0)
        .round()
        .clamp(Version::MIN as f32, Version::MAX as f32);
    let version = Version::new(estimate as u8)?;
    let module_size = sizes.iter().sum::<f32>() / 3.0;

    Some(SymbolCandidate {
        patterns: ids,
        top_left,
        top_right,
        bottom_left,
        module_size,
        corner_module_sizes: [sizes[tl], sizes[tr], sizes[bl]],
        version,
        score: 2.0 * size_ratio + leg_ratio + cosine,
    })
}
