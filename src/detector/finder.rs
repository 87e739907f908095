/// Finder pattern detection using 1:1:3:1:1 run scanning with cross-checks
use crate::models::{BitMatrix, Point};

/// Smallest horizontal 1:1:3:1:1 span worth cross-checking (2 px per module).
const MIN_PATTERN_WIDTH: usize = 14;
const RATIO_TOLERANCE: f32 = 0.5;
const DIAGONAL_TOLERANCE: f32 = 0.75;
/// Confirmations a candidate needs before it is reported.
const MIN_CONFIRMATIONS: u32 = 2;

/// A confirmed finder pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPattern {
    /// Center in continuous pixel coordinates
    pub center: Point,
    /// Estimated module size in pixels
    pub module_size: f32,
    /// Number of row hits merged into this pattern
    pub count: u32,
}

impl FinderPattern {
    pub fn new(x: f32, y: f32, module_size: f32) -> Self {
        Self {
            center: Point::new(x, y),
            module_size,
            count: 1,
        }
    }

    /// Whether a fresh hit describes the same pattern.
    fn absorbs(&self, x: f32, y: f32, module_size: f32) -> bool {
        (self.center.x - x).abs() <= self.module_size
            && (self.center.y - y).abs() <= self.module_size
            && (self.module_size - module_size).abs() <= (self.module_size * 0.5).max(1.0)
    }

    /// Fold a hit into the running average.
    fn merge(&mut self, x: f32, y: f32, module_size: f32) {
        let n = self.count as f32;
        self.center.x = (self.center.x * n + x) / (n + 1.0);
        self.center.y = (self.center.y * n + y) / (n + 1.0);
        self.module_size = (self.module_size * n + module_size) / (n + 1.0);
        self.count += 1;
    }
}

/// Run lengths through a pattern along one direction.
struct LineRuns {
    runs: [usize; 5],
    /// Dark pixels from the start point backwards, start included
    back: usize,
    /// Dark pixels after the start point
    forward: usize,
}

impl LineRuns {
    fn total(&self) -> usize {
        self.runs.iter().sum()
    }

    /// Center along the walked axis, relative to the start pixel.
    fn recenter(&self, start: isize) -> f32 {
        start as f32 + 1.0 + (self.forward as f32 - self.back as f32) / 2.0
    }
}

pub struct FinderDetector;

impl FinderDetector {
    pub fn detect(matrix: &BitMatrix) -> Vec<FinderPattern> {
        let mut candidates: Vec<FinderPattern> = Vec::new();

        for y in 0..matrix.height() {
            Self::scan_row(matrix, y, &mut candidates);
        }

        candidates.retain(|c| c.count >= MIN_CONFIRMATIONS);
        candidates
    }

    fn scan_row(matrix: &BitMatrix, y: usize, candidates: &mut Vec<FinderPattern>) {
        let width = matrix.width();
        if width == 0 {
            return;
        }
        // (start, length, dark)
        let mut runs: Vec<(usize, usize, bool)> = Vec::new();
        let mut run_start = 0usize;
        let mut current = matrix.get(0, y);

        for x in 1..=width {
            // the row end closes the last run
            let color = if x < width { matrix.get(x, y) } else { !current };
            if color == current {
                continue;
            }
            runs.push((run_start, x - run_start, current));
            run_start = x;
            current = color;

            if runs.len() < 5 {
                continue;
            }
            let window = &runs[runs.len() - 5..];
            if !window[0].2 {
                continue;
            }
            let lengths = [
                window[0].1,
                window[1].1,
                window[2].1,
                window[3].1,
                window[4].1,
            ];
            let total: usize = lengths.iter().sum();
            if total < MIN_PATTERN_WIDTH || !ratio_ok(&lengths, RATIO_TOLERANCE) {
                continue;
            }

            let center_x = window[2].0 as f32 + window[2].1 as f32 / 2.0;
            if let Some((cx, cy, module_size)) =
                Self::cross_check(matrix, center_x, y as f32 + 0.5, total)
            {
                match candidates.iter_mut().find(|c| c.absorbs(cx, cy, module_size)) {
                    Some(existing) => existing.merge(cx, cy, module_size),
                    None => candidates.push(FinderPattern::new(cx, cy, module_size)),
                }
            }
        }
    }

    /// Vertical, horizontal, then diagonal confirmation of a row hit.
    ///
    /// Returns the refined center and the module size.
    fn cross_check(
        matrix: &BitMatrix,
        center_x: f32,
        center_y: f32,
        row_total: usize,
    ) -> Option<(f32, f32, f32)> {
        let x = center_x.floor() as isize;
        let y = center_y.floor() as isize;

        let vertical = line_runs(matrix, x, y, (0, 1), row_total)?;
        let vertical_total = vertical.total();
        if !similar_span(vertical_total, row_total) || !ratio_ok(&vertical.runs, RATIO_TOLERANCE) {
            return None;
        }
        let center_y = vertical.recenter(y);
        let y = center_y.floor() as isize;

        let horizontal = line_runs(matrix, x, y, (1, 0), row_total)?;
        let horizontal_total = horizontal.total();
        if !similar_span(horizontal_total, row_total)
            || !ratio_ok(&horizontal.runs, RATIO_TOLERANCE)
        {
            return None;
        }
        let center_x = horizontal.recenter(x);
        let x = center_x.floor() as isize;

        let diagonal = line_runs(matrix, x, y, (1, 1), row_total * 2)?;
        if !ratio_ok(&diagonal.runs, DIAGONAL_TOLERANCE) {
            return None;
        }

        let module_size = (horizontal_total + vertical_total) as f32 / 14.0;
        Some((center_x, center_y, module_size))
    }
}

/// Spans within 40% of each other.
fn similar_span(total: usize, reference: usize) -> bool {
    5 * total.abs_diff(reference) < 2 * reference
}

/// 1:1:3:1:1 check. Outer runs may deviate from one unit by `tolerance`
/// units, the center run from three units by twice that.
pub(crate) fn ratio_ok(runs: &[usize; 5], tolerance: f32) -> bool {
    let total: usize = runs.iter().sum();
    if total < 7 || runs.contains(&0) {
        return false;
    }
    let unit = total as f32 / 7.0;
    let limit = unit * tolerance;
    let near = |run: usize, expected: f32, limit: f32| (run as f32 - expected).abs() <= limit;

    near(runs[0], unit, limit)
        && near(runs[1], unit, limit)
        && near(runs[3], unit, limit)
        && near(runs[4], unit, limit)
        && near(runs[2], 3.0 * unit, 2.0 * limit)
}

/// Walk out from a dark start pixel in both directions along `(dx, dy)`,
/// collecting dark-light-dark on each side. Any run longer than `max_run`
/// (or a center run longer in total) rejects the line; leaving the image
/// ends a run.
fn line_runs(
    matrix: &BitMatrix,
    x: isize,
    y: isize,
    (dx, dy): (isize, isize),
    max_run: usize,
) -> Option<LineRuns> {
    if matrix.get_signed(x, y) != Some(true) {
        return None;
    }

    let pixel = |step: isize| matrix.get_signed(x + dx * step, y + dy * step);
    let run = |step: &mut isize, direction: isize, dark: bool, limit: usize| -> Option<usize> {
        let mut length = 0usize;
        while pixel(*step) == Some(dark) {
            length += 1;
            *step += direction;
            if length > limit {
                return None;
            }
        }
        Some(length)
    };

    let mut step = 0isize;
    let back = run(&mut step, -1, true, max_run)?;
    let light_before = run(&mut step, -1, false, max_run)?;
    let dark_before = run(&mut step, -1, true, max_run)?;

    let mut step = 1isize;
    let forward = run(&mut step, 1, true, max_run.saturating_sub(back))?;
    let light_after = run(&mut step, 1, false, max_run)?;
    let dark_after = run(&mut step, 1, true, max_run)?;

    let runs = [dark_before, light_before, back + forward, light_after, dark_after];
    if runs.contains(&0) {
        return None;
    }
    Some(LineRuns {
        runs,
        back,
        forward,
    })
}
