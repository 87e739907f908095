/// Geometry helpers: projective mapping between module space and image space
use crate::models::Point;

/// Projective (homography) transform, stored row-major with `a33 = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    m: [f64; 8],
}

impl PerspectiveTransform {
    /// Transform mapping each `src[i]` onto `dst[i]`.
    ///
    /// Solves the 8x8 direct linear transform system; `None` when the points
    /// are degenerate (three of them collinear, or repeated).
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for i in 0..4 {
            let (sx, sy) = (src[i].x as f64, src[i].y as f64);
            let (dx, dy) = (dst[i].x as f64, dst[i].y as f64);
            let row = i * 2;
            a[row] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[row] = dx;
            a[row + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[row + 1] = dy;
        }

        let m = solve_linear_system(a, b)?;
        m.iter().all(|v| v.is_finite()).then_some(Self { m })
    }

    /// Map a point. Points on the line at infinity come back non-finite.
    pub fn transform(&self, p: &Point) -> Point {
        let m = &self.m;
        let (x, y) = (p.x as f64, p.y as f64);
        let denominator = m[6] * x + m[7] * y + 1.0;
        if denominator.abs() < 1e-12 {
            return Point::new(f32::NAN, f32::NAN);
        }
        Point::new(
            ((m[0] * x + m[1] * y + m[2]) / denominator) as f32,
            ((m[3] * x + m[4] * y + m[5]) / denominator) as f32,
        )
    }
}

/// Gaussian elimination with partial pivoting.
#[allow(clippy::needless_range_loop)]
fn solve_linear_system(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> Option<[f64; 8]> {
    let n = 8;

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if a[k][i].abs() > a[max_row][i].abs() {
                max_row = k;
            }
        }
        if a[max_row][i].abs() < 1e-12 {
            return None;
        }
        if max_row != i {
            a.swap(i, max_row);
            b.swap(i, max_row);
        }

        for k in (i + 1)..n {
            let factor = a[k][i] / a[i][i];
            b[k] -= factor * b[i];
            for j in i..n {
                a[k][j] -= factor * a[i][j];
            }
        }
    }

    let mut x = [0.0f64; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}

/// |cos| of the angle at `corner` between the rays to `a` and `b`.
pub fn corner_cosine(corner: &Point, a: &Point, b: &Point) -> Option<f32> {
    let u = corner.to(a);
    let v = corner.to(b);
    let denom = u.length() * v.length();
    if denom <= f32::EPSILON {
        return None;
    }
    Some((u.dot(&v) / denom).abs())
}
