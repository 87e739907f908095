//! Module-grid fixtures and renderers shared by the integration tests.
//!
//! Grids are written row by row, `#` dark and `.` light, as produced by a
//! reference encoder.

#![allow(dead_code)]

use qrlyzer::GrayscaleImage;

/// "qrlyzer", byte mode, 1-M, mask 2
pub const QRLYZER: &[&str] = &[
    "#######...#.#.#######",
    "#.....#..##.#.#.....#",
    "#.###.#.##....#.###.#",
    "#.###.#.#.#.#.#.###.#",
    "#.###.#.#...#.#.###.#",
    "#.....#.#.##..#.....#",
    "#######.#.#.#.#######",
    "........##...........",
    "#.#####....#..#####..",
    "#.##...##.######..###",
    "..###.##..#.#.##...#.",
    "##..#..##.##########.",
    "##.######.#.#..#.....",
    "........###.#...##.##",
    "#######...##.#....##.",
    "#.....#.##.......####",
    "#.###.#.#..#.#...#.#.",
    "#.###.#.#########....",
    "#.###.#.#.#.#.#..##..",
    "#.....#....########..",
    "#######.#...#..###.#.",
];

/// "HELLO WORLD", alphanumeric mode, 1-Q, mask 5
pub const HELLO: &[&str] = &[
    "#######.#..#..#######",
    "#.....#.##..#.#.....#",
    "#.###.#..####.#.###.#",
    "#.###.#..####.#.###.#",
    "#.###.#..#....#.###.#",
    "#.....#..####.#.....#",
    "#######.#.#.#.#######",
    ".........#.##........",
    ".#....#####.##.....##",
    "#.####.#....####.###.",
    "....#####......#.#..#",
    "#.###....##.#........",
    "##.########.###.#####",
    "........#...####.#.##",
    "#######.##....#.###.#",
    "#.....#...#..#..#.###",
    "#.###.#..#.......###.",
    "#.###.#.....#....##..",
    "#.###.#..#....#....##",
    "#.....#.###....#..#.#",
    "#######..###.#..#....",
];

pub const V3_TEXT: &str = "https://github.com/qrlyzer/qrlyzer";

/// `V3_TEXT`, byte mode, 3-M, mask 4
pub const V3: &[&str] = &[
    "#######.####.....#....#######",
    "#.....#..##.....#.###.#.....#",
    "#.###.#..#.###.####.#.#.###.#",
    "#.###.#.###.#.###.##..#.###.#",
    "#.###.#.##...##.##....#.###.#",
    "#.....#.#....###.####.#.....#",
    "#######.#.#.#.#.#.#.#.#######",
    "........###.#.#..#.#.........",
    "#...#.###.#.####.#.#.#####..#",
    "........#.###.....#..########",
    ".#.#.##.###.#######.#.##....#",
    "##..##.####..#..###...####.##",
    "#..####..###.#..##.#.#.....#.",
    "...#.#..###.#####.....#######",
    "#####.#.##.#...#....####.##.#",
    "#..#.#..#.#.#.##.#.###.....##",
    "##.#..###...###..##.#..#...#.",
    "#..##...#####..####.#.####.##",
    "....#.#.#..######.#.#.....#.#",
    "...#....#.####..###.##.##..##",
    "####..#.##..##.###..######..#",
    "........###..####..##...#...#",
    "#######.#..#...#.#.##.#.###.#",
    "#.....#...#.#.#######...#..#.",
    "#.###.#.##..######.#######...",
    "#.###.#........##....#......#",
    "#.###.#....#..###..###...####",
    "#.....#..##..#.#.#..###.##.##",
    "#######.###.#..#.#..######.#.",
];

pub const V7_TEXT: &str = "The quick brown fox jumps over the lazy dog. \
                           Pack my box with five dozen liquor jugs! 0123456789";

/// `V7_TEXT`, byte mode, 7-L, mask 1
pub const V7: &[&str] = &[
    "#######.#..#..#####....#..###.#.##..#.#######",
    "#.....#.#.##.###.#..#.#...#..###.#.#..#.....#",
    "#.###.#.....#..##........####...##.#..#.###.#",
    "#.###.#...##.#..##.##...##.##.#....##.#.###.#",
    "#.###.#.####....##..########....#####.#.###.#",
    "#.....#.##...##.....#...##.##.........#.....#",
    "#######.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#######",
    "........#.###.##.#..#...##..#...#.#.#........",
    "###..##.###.#..###############..###..####..##",
    "..####.##.##...###.....#.#.#....#..#.#..#.#.#",
    "####..#.####.#.#.#..######.#.#..##.....###.##",
    "#.#.##.#....#.####...#.#.###.....####..###.#.",
    ".######.#.....##..#.##.###.##.#..#...#.##...#",
    "#.#.#......#..##.##.....####....###....#....#",
    ".#.##.#.#..######..#..#.#####.#..####..####.#",
    "..###.....#.##....#....######..##...#...##...",
    ".#.##.#....#.##.#..##.###...###.####.#..#..##",
    ".#.##..#.#..##......###..#..##.###.#.#...#..#",
    "...#.###.###..#.#.###.#..#.#.....#.#.#.##.#.#",
    "#...##.#.##.##.....###..#....###...#...###...",
    "..#.######..#.##..#######.#..#.##.#.######.#.",
    "#...#...#.##..#...###...#...####...##...#...#",
    "...##.#.###.#...###.#.#.#.#..####.###.#.#.###",
    "....#...#.###.##.#.##...##.###..#.#.#...##..#",
    "#...#####.#.#..####.#####...###.##..#####..##",
    "##.###....#....###.######..#.#...#.####..#..#",
    "##.#.##.###.#..#.#.#...#.#.###.##..######...#",
    "##.###..#.....###..##.##.###.....######..#...",
    "####.##.#....###.##.....##.##.#..#.##..#....#",
    "##.#.#.#..##..##..#......###....###..##..#.##",
    ".#....#.....####...#.#..#####.#..###..#...#.#",
    ".#..#...###..#.#..#..#...##.#.#.##.#.##.##.##",
    "#..##.#..######.#..####.##..#####.###.#..#...",
    "##.##..#######.....##.#......#.###.##......#.",
    "....#.#...##.##.########.#...#.###.######...#",
    ".####..#.####......#.#.#.....###...#.##......",
    "#..##.###.#...#...#######.#..#.##.########.##",
    "........##.#..##..#.#...#...####....#...#.#.#",
    "#######.....#...#####.#.#.#..####.#.#.#.#.#.#",
    "#.....#.#.#.#.#.##.##...#...##.######...##.#.",
    "#.###.#..#..#..####.#######.#.#.#.#.######..#",
    "#.###.#..##....###..#....#.......#.###..#...#",
    "#.###.#.#...#..#..#...###.####.##..##...#.#.#",
    "#.....#.#.#....##.#.#....###.....###.#.##....",
    "#######.#.##..##..#.###..#.##.#..#..##.###..#",
];

/// Numeric "0123456789012", alphanumeric "QR-2024" and byte "héllo"; 3-H, mask 3
pub const MIXED: &[&str] = &[
    "#######..##....#..#.#.#######",
    "#.....#..##...##.#.##.#.....#",
    "#.###.#...#.###.....#.#.###.#",
    "#.###.#...#.#.#.####..#.###.#",
    "#.###.#.####.#.#.#..#.#.###.#",
    "#.....#..###.##.#...#.#.....#",
    "#######.#.#.#.#.#.#.#.#######",
    "........######..#####........",
    "..##..####..#.#.....###.#....",
    "###.##........#.#.....#...##.",
    "..##..#....#####......#..####",
    "....##.##....##.#.##..#..##.#",
    "...#.##.#.##..#..#..###.#.##.",
    ".#.#...##...#....##.#....###.",
    ".#.##.##.#....####..#.##....#",
    "#....#.#.##......####...##.#.",
    "###..####.#..#.#....#.#.#....",
    "..####...#..##.##.####..##..#",
    "#..####.#..#.##...##.#.####..",
    "..#..#.##.##..###..#......###",
    ".##...#..#.###..#.#.######..#",
    "........#.#..#.##..##...##...",
    "#######.#####.##.####.#.#....",
    "#.....#..#.###.#..###...#####",
    "#.###.#....#..##...######.##.",
    "#.###.#.####..#.###..#####...",
    "#.###.#.#.#...#..###.#.####.#",
    "#.....#....#####..#...#...#..",
    "#######...#..##.#.#.#........",
];

/// Numeric "4376471154038", 1-M
pub const GOLDEN: &[&str] = &[
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

pub const QUIET_ZONE: usize = 4;

/// Raw pixels of a grid at `scale` pixels per module with a 4-module quiet zone.
pub fn render_pixels(rows: &[&str], scale: usize) -> (Vec<u8>, u32) {
    let side = (rows.len() + 2 * QUIET_ZONE) * scale;
    let mut pixels = vec![255u8; side * side];
    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.bytes().enumerate() {
            if cell != b'#' {
                continue;
            }
            for yy in 0..scale {
                let py = (y + QUIET_ZONE) * scale + yy;
                let start = py * side + (x + QUIET_ZONE) * scale;
                pixels[start..start + scale].fill(0);
            }
        }
    }
    (pixels, side as u32)
}

pub fn render(rows: &[&str], scale: usize) -> GrayscaleImage {
    let (pixels, side) = render_pixels(rows, scale);
    GrayscaleImage::new(side, side, pixels).expect("rendered buffer matches its size")
}

/// Render through an arbitrary pixel-to-module mapping; pixels outside the
/// grid stay white.
pub fn render_mapped(
    rows: &[&str],
    width: u32,
    height: u32,
    to_module: impl Fn(f64, f64) -> (f64, f64),
) -> GrayscaleImage {
    let d = rows.len() as i64;
    let grid: Vec<&[u8]> = rows.iter().map(|r| r.as_bytes()).collect();
    let mut pixels = vec![255u8; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let (mx, my) = to_module(x as f64 + 0.5, y as f64 + 0.5);
            let (ix, iy) = (mx.floor() as i64, my.floor() as i64);
            if (0..d).contains(&ix) && (0..d).contains(&iy) && grid[iy as usize][ix as usize] == b'#'
            {
                pixels[(y * width + x) as usize] = 0;
            }
        }
    }
    GrayscaleImage::new(width, height, pixels).expect("rendered buffer matches its size")
}

/// Rotation by `angle` radians and scale `scale` about `(cx, cy)`, with a
/// mild perspective term that shrinks or grows the symbol along image y.
pub fn rotated_view(
    dimension: usize,
    angle: f64,
    scale: f64,
    cx: f64,
    cy: f64,
    perspective: f64,
) -> impl Fn(f64, f64) -> (f64, f64) {
    let (sa, ca) = angle.sin_cos();
    let half = dimension as f64 / 2.0;
    move |x, y| {
        let mut mx = (x - cx) / scale;
        let mut my = (y - cy) / scale;
        let f = 1.0 + perspective * my;
        mx /= f;
        my /= f;
        (ca * mx + sa * my + half, -sa * mx + ca * my + half)
    }
}

/// Rotate a grid clockwise by 90 degrees `quarter_turns` times.
pub fn rotate(rows: &[&str], quarter_turns: usize) -> Vec<String> {
    let mut grid: Vec<Vec<u8>> = rows.iter().map(|r| r.as_bytes().to_vec()).collect();
    for _ in 0..quarter_turns % 4 {
        let n = grid.len();
        grid = (0..n)
            .map(|y| (0..n).map(|x| grid[n - 1 - x][y]).collect())
            .collect();
    }
    grid.into_iter()
        .map(|row| String::from_utf8(row).expect("grid rows are ASCII"))
        .collect()
}

/// Flip every module in the rectangle `xs` by `ys`.
pub fn flip(rows: &[&str], xs: std::ops::Range<usize>, ys: std::ops::Range<usize>) -> Vec<String> {
    let mut grid: Vec<Vec<u8>> = rows.iter().map(|r| r.as_bytes().to_vec()).collect();
    for y in ys {
        for x in xs.clone() {
            grid[y][x] = if grid[y][x] == b'#' { b'.' } else { b'#' };
        }
    }
    grid.into_iter()
        .map(|row| String::from_utf8(row).expect("grid rows are ASCII"))
        .collect()
}

pub fn as_strs(rows: &[String]) -> Vec<&str> {
    rows.iter().map(String::as_str).collect()
}

pub fn texts(symbols: &[qrlyzer::DecodedSymbol]) -> Vec<String> {
    symbols.iter().map(|s| s.text.clone()).collect()
}

/// Replace `percent` of the pixels with pure black or white, from a fixed
/// linear congruential sequence.
pub fn salt_and_pepper(image: &GrayscaleImage, percent: u64) -> GrayscaleImage {
    let mut state: u64 = 0x5eed;
    let mut pixels = image.pixels().to_vec();
    for pixel in pixels.iter_mut() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let r = state >> 33;
        if r % 100 < percent {
            *pixel = if (r >> 8) & 1 == 1 { 255 } else { 0 };
        }
    }
    GrayscaleImage::new(image.width(), image.height(), pixels).expect("same dimensions")
}
