/// Module grid sampling from a symbol candidate
use super::alignment::find_alignment_candidates;
use super::grouping::SymbolCandidate;
use crate::error::CandidateError;
use crate::models::{BitMatrix, Point, Version};
use crate::utils::geometry::PerspectiveTransform;

/// Module-space to image-space transforms worth trying for `version`,
/// most trusted first.
///
/// The three finder centers sit at module (3.5, 3.5) from their corners. The
/// fourth correspondence is either a located alignment pattern, at
/// (d - 6.5, d - 6.5), or the parallelogram completion of the finders, which
/// always comes last.
pub fn grid_transforms(
    matrix: &BitMatrix,
    candidate: &SymbolCandidate,
    version: Version,
) -> Vec<PerspectiveTransform> {
    let d = version.dimension() as f32;
    let tl = candidate.top_left;
    let tr = candidate.top_right;
    let bl = candidate.bottom_left;
    let br = Point::new(tr.x + bl.x - tl.x, tr.y + bl.y - tl.y);

    let finder_src = [
        Point::new(3.5, 3.5),
        Point::new(d - 3.5, 3.5),
        Point::new(3.5, d - 3.5),
    ];
    let affine = PerspectiveTransform::from_points(
        &[finder_src[0], finder_src[1], finder_src[2], Point::new(d - 3.5, d - 3.5)],
        &[tl, tr, bl, br],
    );
    let Some(affine) = affine else {
        return Vec::new();
    };

    let mut transforms = Vec::new();
    if version.number() >= 2 {
        let alignment_module = Point::new(d - 6.5, d - 6.5);
        if let Some((predicted, unit_x, unit_y)) = predict_alignment(candidate, d) {
            for found in
                find_alignment_candidates(matrix, predicted, unit_x, unit_y, candidate.module_size)
            {
                let src = [finder_src[0], finder_src[1], finder_src[2], alignment_module];
                if let Some(t) = PerspectiveTransform::from_points(&src, &[tl, tr, bl, found]) {
                    transforms.push(t);
                }
            }
        }
    }
    transforms.push(affine);
    transforms
}

/// Where the bottom-right alignment pattern should be, with the image
/// vectors of one module along rows and columns there.
///
/// Finder module sizes shrink with distance from the camera, so the
/// projective weight of each finder is taken as the square root of its size
/// relative to the top-left one. With equal sizes this is the parallelogram
/// completion and the leg directions.
fn predict_alignment(candidate: &SymbolCandidate, d: f32) -> Option<(Point, Point, Point)> {
    let [size_tl, size_tr, size_bl] = candidate.corner_module_sizes;
    if size_tr <= 0.0 || size_bl <= 0.0 {
        return None;
    }
    let (tl, tr, bl) = (candidate.top_left, candidate.top_right, candidate.bottom_left);
    let span = d - 7.0;
    let w_tr = (size_tl / size_tr).sqrt();
    let w_bl = (size_tl / size_bl).sqrt();
    let (a, b) = ((w_tr - 1.0) / span, (w_bl - 1.0) / span);

    // homogeneous image coordinates are affine in module space
    let du = Point::new((tr.x * w_tr - tl.x) / span, (tr.y * w_tr - tl.y) / span);
    let dv = Point::new((bl.x * w_bl - tl.x) / span, (bl.y * w_bl - tl.y) / span);

    let u = span - 3.0;
    let w = 1.0 + (a + b) * u;
    if w <= f32::EPSILON {
        return None;
    }
    let center = Point::new(
        (tl.x + (du.x + dv.x) * u) / w,
        (tl.y + (du.y + dv.y) * u) / w,
    );
    let unit_x = Point::new((du.x - center.x * a) / w, (du.y - center.y * a) / w);
    let unit_y = Point::new((dv.x - center.x * b) / w, (dv.y - center.y * b) / w);
    [center, unit_x, unit_y]
        .iter()
        .all(Point::is_finite)
        .then_some((center, unit_x, unit_y))
}

/// Sample a `dimension`-square module grid through `transform`.
///
/// Each module is a majority vote over a small window around the pixel under
/// its center; the window grows with the module size up to 5x5. A module
/// center outside the image fails the whole grid.
pub(crate) fn sample_grid(
    matrix: &BitMatrix,
    transform: &PerspectiveTransform,
    dimension: usize,
    module_size: f32,
) -> Result<BitMatrix, CandidateError> {
    let radius = ((module_size / 4.0) as isize).clamp(0, 2);
    let width = matrix.width() as isize;
    let height = matrix.height() as isize;
    let mut grid = BitMatrix::square(dimension);

    for y in 0..dimension {
        for x in 0..dimension {
            let p = transform.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5));
            if !p.is_finite() {
                return Err(CandidateError::OutOfBounds);
            }
            let (px, py) = (p.x.floor() as isize, p.y.floor() as isize);
            if px < 0 || py < 0 || px >= width || py >= height {
                return Err(CandidateError::OutOfBounds);
            }

            let (mut dark, mut total) = (0usize, 0usize);
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if let Some(value) = matrix.get_signed(px + dx, py + dy) {
                        total += 1;
                        dark += value as usize;
                    }
                }
            }
            if dark * 2 > total {
                grid.set(x, y, true);
            }
        }
    }

    Ok(grid)
}

/// Outer symbol corners (top-left, top-right, bottom-right, bottom-left).
pub fn symbol_corners(transform: &PerspectiveTransform, dimension: usize) -> [Point; 4] {
    let d = dimension as f32;
    [
        Point::new(0.0, 0.0),
        Point::new(d, 0.0),
        Point::new(d, d),
        Point::new(0.0, d),
    ]
    .map(|p| transform.transform(&p))
}
