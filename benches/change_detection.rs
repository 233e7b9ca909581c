use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use image::{GrayImage, Luma};
use wetness_detector::analysis::change::ChangeDetector;

fn frames(width: u32, height: u32) -> (GrayImage, GrayImage) {
    let baseline = GrayImage::from_fn(width, height, |x, y| Luma([((x ^ y) % 256) as u8]));
    let snapshot = GrayImage::from_fn(width, height, |x, y| {
        Luma([((x ^ y).wrapping_add(x / 7) % 256) as u8])
    });
    (baseline, snapshot)
}

fn bench_detect(c: &mut Criterion) {
    let detector = ChangeDetector::default();

    for (label, width, height) in [("640x480", 640, 480), ("1920x1080", 1920, 1080)] {
        let (baseline, snapshot) = frames(width, height);
        c.bench_function(&format!("detect {}", label), |b| {
            b.iter(|| detector.detect(black_box(&baseline), black_box(&snapshot)))
        });
    }
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
