use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qrlyzer::detector::finder::FinderDetector;
use qrlyzer::utils::binarization::hybrid_binarize;
use qrlyzer::{DecodeOptions, GrayscaleImage, decode_with_options};

mod common;

fn bench_decode_small(c: &mut Criterion) {
    let image = common::scene(100, 100, 3);
    let options = DecodeOptions::default();
    c.bench_function("decode_100x100", |b| {
        b.iter(|| decode_with_options(black_box(&image), black_box(&options)))
    });
}

fn bench_decode_medium(c: &mut Criterion) {
    let image = common::scene(640, 480, 8);
    let options = DecodeOptions::default();
    c.bench_function("decode_640x480", |b| {
        b.iter(|| decode_with_options(black_box(&image), black_box(&options)))
    });
}

fn bench_decode_large(c: &mut Criterion) {
    let image = common::scene(1920, 1080, 20);
    let options = DecodeOptions::default();
    c.bench_function("decode_1920x1080", |b| {
        b.iter(|| decode_with_options(black_box(&image), black_box(&options)))
    });
}

fn bench_decode_empty_with_resize(c: &mut Criterion) {
    let image = GrayscaleImage::new(320, 240, vec![128u8; 320 * 240]).expect("valid buffer");
    let options = DecodeOptions::default().with_auto_resize(true);
    c.bench_function("decode_empty_320x240_auto_resize", |b| {
        b.iter(|| decode_with_options(black_box(&image), black_box(&options)))
    });
}

fn bench_finder_medium(c: &mut Criterion) {
    let binary = hybrid_binarize(&common::scene(640, 480, 8));
    c.bench_function("finder_640x480", |b| {
        b.iter(|| FinderDetector::detect(black_box(&binary)))
    });
}

criterion_group!(
    benches,
    bench_decode_small,
    bench_decode_medium,
    bench_decode_large,
    bench_decode_empty_with_resize,
    bench_finder_medium
);
criterion_main!(benches);
