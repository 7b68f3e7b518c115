//! Benchmarks for letterbox composition

use criterion::{Criterion, criterion_group, criterion_main};
use desktop_curator::wallpaper::{compose, fit_rect};
use image::{DynamicImage, Rgb, RgbImage};
use std::hint::black_box;

fn bench_fit_rect(c: &mut Criterion) {
    c.bench_function("fit_rect_1080p", |b| {
        b.iter(|| {
            fit_rect(
                black_box(1920),
                black_box(1080),
                black_box(1000),
                black_box(1000),
            )
        });
    });
}

fn bench_compose(c: &mut Criterion) {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 480, Rgb([120, 90, 200])));

    c.bench_function("compose_640x480_to_1080p", |b| {
        b.iter(|| compose(black_box(&image), 1920, 1080));
    });
}

criterion_group!(benches, bench_fit_rect, bench_compose);
criterion_main!(benches);
