use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyph_features::core::Grid;
use glyph_features::{extract_features, FeatureParams};

/// Block letter "A" on a `size x size` canvas.
fn letter_a(size: usize) -> Grid {
    let stroke = (size / 8).max(1);
    let mask = (0..size * size)
        .map(|i| {
            let (x, y) = ((i % size) as f64, (i / size) as f64);
            let s = size as f64;
            let t = y / s;
            let left = s / 2.0 - t * s / 2.5;
            let right = s / 2.0 + t * s / 2.5;
            let w = stroke as f64;
            let on_left = (x - left).abs() < w;
            let on_right = (x - right).abs() < w;
            let on_bar = (y - s * 0.6).abs() < w / 2.0 && x > left && x < right;
            y > s * 0.1 && y < s * 0.9 && (on_left || on_right || on_bar)
        })
        .collect();
    Grid::from_mask(size, size, mask).expect("valid glyph grid")
}

fn bench_extract(c: &mut Criterion) {
    let params = FeatureParams::default();
    let mut group = c.benchmark_group("extract_features");
    group.sample_size(20);
    for size in [16usize, 28] {
        let grid = letter_a(size);
        group.bench_function(format!("letter_a_{size}"), |b| {
            b.iter(|| extract_features(black_box(&grid), &params).expect("extract"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
