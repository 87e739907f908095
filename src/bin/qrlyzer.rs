use clap::{Parser, Subcommand};
use qrlyzer::detector::finder::FinderDetector;
use qrlyzer::detector::grouping::group_finder_patterns;
use qrlyzer::tools::{binary_stats, expand_image_paths, grayscale_stats, load_grayscale};
use qrlyzer::utils::binarization::{hybrid_binarize, otsu_binarize, otsu_threshold};
use qrlyzer::{Detection, QrError, detect_and_decode_with_bbox};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrlyzer", version, about = "Detect and decode QR codes in images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode every QR code in one or more images (directories are searched)
    Decode {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Retry on rescaled copies when nothing is found
        #[arg(long)]
        auto_resize: bool,
        /// Print the bounding box before each text
        #[arg(long)]
        bbox: bool,
    },
    /// Print grayscale/binary stats and finder patterns for an image
    Inspect { image: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QRLYZER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Decode {
            images,
            auto_resize,
            bbox,
        } => decode_cmd(&images, auto_resize, bbox),
        Command::Inspect { image } => inspect_cmd(&image),
    }
}

fn decode_cmd(images: &[PathBuf], auto_resize: bool, bbox: bool) -> ExitCode {
    let paths: Vec<PathBuf> = images.iter().flat_map(expand_image_paths).collect();
    let multiple = paths.len() > 1;

    let start = Instant::now();
    let results: Vec<(&PathBuf, Result<Vec<Detection>, QrError>)> = paths
        .par_iter()
        .map(|path| (path, detect_and_decode_with_bbox(path, auto_resize)))
        .collect();
    tracing::debug!(files = paths.len(), elapsed = ?start.elapsed(), "decode finished");

    let mut failed = false;
    for (path, result) in results {
        match result {
            Ok(detections) => {
                for detection in detections {
                    let prefix = if multiple {
                        format!("{}: ", path.display())
                    } else {
                        String::new()
                    };
                    if bbox {
                        let b = detection.bbox;
                        println!(
                            "{prefix}{} {} {} {}\t{}",
                            b.x, b.y, b.width, b.height, detection.content
                        );
                    } else {
                        println!("{prefix}{}", detection.content);
                    }
                }
            }
            Err(err) => {
                eprintln!("{err}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn inspect_cmd(path: &Path) -> ExitCode {
    let image = match load_grayscale(path) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Image: {} ({}x{})", path.display(), image.width(), image.height());
    let gray_stats = grayscale_stats(&image);
    println!(
        "Grayscale range: {}-{}, average: {}, otsu threshold: {}",
        gray_stats.min,
        gray_stats.max,
        gray_stats.avg,
        otsu_threshold(image.pixels())
    );

    for (name, binary) in [
        ("hybrid", hybrid_binarize(&image)),
        ("otsu", otsu_binarize(&image)),
    ] {
        let stats = binary_stats(&binary);
        println!(
            "Binary ({name}): dark_pixels={} total={} dark_ratio={:.2}%",
            stats.dark_pixels,
            stats.total_pixels,
            stats.dark_ratio * 100.0
        );

        let patterns = FinderDetector::detect(&binary);
        println!("  Found {} finder patterns", patterns.len());
        for (i, pattern) in patterns.iter().take(10).enumerate() {
            println!(
                "    Pattern {}: center=({:.1}, {:.1}) module_size={:.2} hits={}",
                i, pattern.center.x, pattern.center.y, pattern.module_size, pattern.count
            );
        }

        let groups = group_finder_patterns(&patterns);
        println!("  Formed {} finder triples", groups.len());
        for group in groups.iter().take(5) {
            println!(
                "    {:?}: version {} module_size={:.2} score={:.3}",
                group.patterns,
                group.version.number(),
                group.module_size,
                group.score
            );
        }
    }

    ExitCode::SUCCESS
}
