//! Benchmarks for circular suffix ranking and the Burrows-Wheeler Transform.
//!
//! This benchmark suite evaluates:
//! - Prefix doubling vs pairwise comparison ranking
//! - Forward and inverse BWT throughput across data patterns
//! - Parallel batch transform (when the `parallel` feature is enabled)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxibwt_transform::{CircularSuffixArray, RankingStrategy, bwt};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - every rotation is equal
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - ranks settle after one or two rounds
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Repetitive pattern - long shared prefixes
    pub fn repetitive(size: usize) -> Vec<u8> {
        let pattern = b"TOBEORNOTTOBEORTOBEORNOT";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            data.extend_from_slice(&pattern[..remaining.min(pattern.len())]);
        }
        data
    }

    /// Text-like data - realistic scenario
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        let mut data = Vec::with_capacity(size);
        let mut seed = 42u32;
        while data.len() < size {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            let start = ((seed >> 8) as usize) % text.len();
            let remaining = size - data.len();
            let chunk = &text[start..];
            data.extend_from_slice(&chunk[..remaining.min(chunk.len())]);
        }
        data
    }
}

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const TINY: usize = 1024; // 1 KB
    pub const SMALL: usize = 16 * 1024; // 16 KB
    pub const MEDIUM: usize = 64 * 1024; // 64 KB
}

const PATTERNS: [(&str, PatternGenerator); 4] = [
    ("uniform", test_data::uniform),
    ("random", test_data::random),
    ("repetitive", test_data::repetitive),
    ("text", test_data::text_like),
];

/// Compare ranking strategies on small blocks, where comparison is viable
fn bench_ranking_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("suffix_ranking");

    for (name, generate) in PATTERNS {
        let data = generate(data_sizes::TINY);
        group.throughput(Throughput::Bytes(data.len() as u64));

        for (label, strategy) in [
            ("doubling", RankingStrategy::PrefixDoubling),
            ("comparison", RankingStrategy::Comparison),
        ] {
            group.bench_with_input(BenchmarkId::new(label, name), &data, |b, data| {
                b.iter(|| {
                    let csa = CircularSuffixArray::with_strategy(black_box(data), strategy)
                        .unwrap();
                    black_box(csa);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark forward BWT across patterns and sizes
fn bench_bwt_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt_forward");

    for (name, generate) in PATTERNS {
        for size in [data_sizes::SMALL, data_sizes::MEDIUM] {
            let data = generate(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(name, format!("{}KB", size / 1024)),
                &data,
                |b, data| {
                    b.iter(|| black_box(bwt::forward(black_box(data)).unwrap()));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark inverse BWT (counting sort + chain walk)
fn bench_bwt_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt_inverse");

    for (name, generate) in PATTERNS {
        let data = generate(data_sizes::MEDIUM);
        let block = bwt::forward(&data).unwrap();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &block, |b, block| {
            b.iter(|| black_box(block.invert().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark parallel batch forward transform
#[cfg(feature = "parallel")]
fn bench_bwt_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt_parallel");

    let blocks: Vec<Vec<u8>> = (0..8)
        .map(|_| test_data::text_like(data_sizes::SMALL))
        .collect();
    let refs: Vec<&[u8]> = blocks.iter().map(Vec::as_slice).collect();

    group.throughput(Throughput::Bytes((blocks.len() * data_sizes::SMALL) as u64));
    group.bench_function("8x16KB", |b| {
        b.iter(|| black_box(bwt::forward_blocks_parallel(black_box(&refs)).unwrap()));
    });

    group.finish();
}

#[cfg(not(feature = "parallel"))]
criterion_group!(
    benches,
    bench_ranking_strategies,
    bench_bwt_forward,
    bench_bwt_inverse
);

#[cfg(feature = "parallel")]
criterion_group!(
    benches,
    bench_ranking_strategies,
    bench_bwt_forward,
    bench_bwt_inverse,
    bench_bwt_parallel
);

criterion_main!(benches);
