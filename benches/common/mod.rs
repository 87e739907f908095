#![allow(dead_code)]

use qrlyzer::GrayscaleImage;

/// "qrlyzer", byte mode, 1-M
const SYMBOL: &[&str] = &[
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

/// A `width` x `height` horizontal gradient with the symbol drawn in the
/// middle at `scale` pixels per module.
pub fn scene(width: u32, height: u32, scale: u32) -> GrayscaleImage {
    let (w, h) = (width as usize, height as usize);
    let mut pixels: Vec<u8> = (0..w * h)
        .map(|i| (160 + (i % w) * 80 / w.max(1)) as u8)
        .collect();

    let side = (SYMBOL.len() + 8) * scale as usize;
    let left = w.saturating_sub(side) / 2;
    let top = h.saturating_sub(side) / 2;
    for (y, row) in SYMBOL.iter().enumerate() {
        for (x, cell) in row.bytes().enumerate() {
            for yy in 0..scale as usize {
                for xx in 0..scale as usize {
                    let px = left + (x + 4) * scale as usize + xx;
                    let py = top + (y + 4) * scale as usize + yy;
                    if px < w && py < h {
                        pixels[py * w + px] = if cell == b'#' { 20 } else { 250 };
                    }
                }
            }
        }
    }

    GrayscaleImage::new(width, height, pixels).expect("scene buffer matches its size")
}
