/// Alignment pattern search around a predicted position
/// Alignment patterns appear in QR codes version 2 and above
use crate::models::{BitMatrix, Point};

/// Search radius around the prediction, in module sizes.
const SEARCH_RADIUS_MODULES: f32 = 16.0;
/// Template positions per module along each axis; large modules are
/// searched on a coarser pixel lattice.
const POSITIONS_PER_MODULE: f32 = 4.0;
/// Template scales tried; perspective stretches modules near the far corner.
const TEMPLATE_SCALES: [f32; 5] = [1.0, 0.9, 1.1, 0.8, 1.2];
/// Mismatching template cells tolerated out of 25.
const MAX_MISMATCH: u32 = 3;
/// Distinct candidates returned.
const MAX_CANDIDATES: usize = 3;

/// A scored template position.
#[derive(Debug, Clone, Copy)]
struct Hit {
    mismatch: u32,
    distance: f32,
    center: Point,
}

/// Candidate alignment pattern centers, most plausible first.
///
/// `unit_x` and `unit_y` are the image-space vectors of one module along the
/// symbol's rows and columns. Pixel centers within the search radius, every
/// quarter module, are matched against the 5x5 dark-light-dark template;
/// hits are ranked by mismatch, then by distance to `predicted`, and up to
/// three centers at least two modules apart are returned.
pub fn find_alignment_candidates(
    matrix: &BitMatrix,
    predicted: Point,
    unit_x: Point,
    unit_y: Point,
    module_size: f32,
) -> Vec<Point> {
    let radius = SEARCH_RADIUS_MODULES * module_size;
    let x0 = (predicted.x - radius).floor() as isize;
    let x1 = (predicted.x + radius).ceil() as isize;
    let y0 = (predicted.y - radius).floor() as isize;
    let y1 = (predicted.y + radius).ceil() as isize;
    let step = ((module_size / POSITIONS_PER_MODULE) as usize).max(1);

    let mut hits = Vec::new();
    for y in (y0..=y1).step_by(step) {
        for x in (x0..=x1).step_by(step) {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = center.distance(&predicted);
            if distance > radius {
                continue;
            }
            if let Some(mismatch) = best_template_match(matrix, center, unit_x, unit_y) {
                hits.push(Hit {
                    mismatch,
                    distance,
                    center,
                });
            }
        }
    }

    hits.sort_by(|a, b| {
        a.mismatch
            .cmp(&b.mismatch)
            .then(a.distance.total_cmp(&b.distance))
            .then(a.center.x.total_cmp(&b.center.x))
            .then(a.center.y.total_cmp(&b.center.y))
    });

    let mut picked: Vec<Point> = Vec::new();
    for hit in &hits {
        if picked
            .iter()
            .any(|p| p.distance(&hit.center) < 2.0 * module_size)
        {
            continue;
        }
        // centroid of the equally good positions around this one
        let (mut sx, mut sy, mut n) = (0.0f32, 0.0f32, 0usize);
        for other in hits.iter().filter(|o| {
            o.mismatch == hit.mismatch && o.center.distance(&hit.center) <= module_size
        }) {
            sx += other.center.x;
            sy += other.center.y;
            n += 1;
        }
        picked.push(Point::new(sx / n as f32, sy / n as f32));
        if picked.len() == MAX_CANDIDATES {
            break;
        }
    }
    picked
}

/// Fewest template mismatches over the scales, `None` above the limit or
/// when the template leaves the image.
fn best_template_match(
    matrix: &BitMatrix,
    center: Point,
    unit_x: Point,
    unit_y: Point,
) -> Option<u32> {
    let mut best: Option<u32> = None;
    for scale in TEMPLATE_SCALES {
        let mut mismatch = 0u32;
        'template: for j in -2i32..=2 {
            for i in -2i32..=2 {
                let expect_dark = i.abs().max(j.abs()) != 1;
                let (fi, fj) = (i as f32 * scale, j as f32 * scale);
                let px = (center.x + fi * unit_x.x + fj * unit_y.x).floor() as isize;
                let py = (center.y + fi * unit_x.y + fj * unit_y.y).floor() as isize;
                let Some(dark) = matrix.get_signed(px, py) else {
                    return best;
                };
                if dark != expect_dark {
                    mismatch += 1;
                    if mismatch > MAX_MISMATCH {
                        break 'template;
                    }
                }
            }
        }
        if mismatch <= MAX_MISMATCH && best.is_none_or(|b| mismatch < b) {
            best = Some(mismatch);
        }
    }
    best
}
