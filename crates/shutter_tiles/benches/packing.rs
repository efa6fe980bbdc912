//! Packing benchmarks
//!
//! Run with: `cargo bench -p shutter_tiles`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shutter_tiles::{select_4x3, EventLayout, ShareLayout};

/// Deterministic spread of portrait, square and landscape ratios
fn ratios(count: usize) -> Vec<f32> {
    const CYCLE: [f32; 6] = [1.5, 0.75, 1.0, 1.777, 0.5625, 1.333];
    (0..count).map(|i| CYCLE[i % CYCLE.len()]).collect()
}

fn bench_share(c: &mut Criterion) {
    let mut group = c.benchmark_group("share");
    let layout = ShareLayout::new(390.0);

    for count in [4, 16, 64, 256] {
        let input = ratios(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| layout.apply(black_box(input)))
        });
    }

    group.finish();
}

fn bench_event(c: &mut Criterion) {
    let layout = EventLayout::new(390.0);
    let input = ratios(24);
    c.bench_function("event/24", |b| b.iter(|| layout.apply(black_box(&input))));
}

fn bench_select_4x3(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_4x3");

    for count in [3, 6, 9, 12] {
        let input = ratios(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| select_4x3(black_box(input), black_box(17)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_share, bench_event, bench_select_4x3);
criterion_main!(benches);
