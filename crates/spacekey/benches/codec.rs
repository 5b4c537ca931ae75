//! Benchmarks for point encoding, decoding and rectangle decomposition.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spacekey::{DEFAULT_IOPS_COST, SpatialCodec};

/// Codec widths under test.
const WIDTHS: [u32; 2] = [32, 64];

/// Benchmark `encode_point` near the centre and near a corner of the grid.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for bits in WIDTHS {
        let codec = SpatialCodec::new(bits).expect("valid codec");
        let (_, hi) = codec.valid_input_range();
        for (label, x, y) in [("centre", 3, -5), ("corner", hi - 7, hi - 11)] {
            group.bench_function(BenchmarkId::new(label, bits), |b| {
                b.iter(|| codec.encode_point(black_box(x), black_box(y)))
            });
        }
    }

    group.finish();
}

/// Benchmark `decode_point` on a key taken from the middle of the grid.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for bits in WIDTHS {
        let codec = SpatialCodec::new(bits).expect("valid codec");
        let key = codec.encode_point(1234, -4321).expect("in range");
        group.bench_function(BenchmarkId::from_parameter(bits), |b| {
            b.iter(|| codec.decode_point(black_box(key.as_ref())))
        });
    }

    group.finish();
}

/// Benchmark decomposition across query sizes. Cost should stay flat as the
/// rectangle grows because of the sampling budget.
fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    let codec = SpatialCodec::new(64).expect("valid codec");

    for size in [4i64, 64, 1_024, 65_536, 1 << 24] {
        group.bench_function(BenchmarkId::new("square", size), |b| {
            b.iter(|| {
                codec.decompose_rectangle(
                    black_box(-size / 3),
                    black_box(size / 5),
                    size,
                    size,
                    DEFAULT_IOPS_COST,
                )
            })
        });
    }

    for cost in [0.1f32, 1.0, 4.0] {
        group.bench_function(BenchmarkId::new("cost", cost), |b| {
            b.iter(|| codec.decompose_rectangle(-5_000, 7_000, 20_000, 3_000, black_box(cost)))
        });
    }

    group.finish();
}

#[allow(missing_docs, clippy::missing_docs_in_private_items)]
mod bench_defs {
    use super::*;
    criterion_group!(benches, bench_encode, bench_decode, bench_decompose);
}

pub use bench_defs::benches;
criterion_main!(benches);
