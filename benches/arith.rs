//! Slice kernels and single-vector operations on the active tier.
//!
//! Compares the scalar baseline with the SIMD and rayon-parallel kernels
//! for sizes from L1-resident to memory-bound, and measures a few
//! per-vector operations whose cost differs between tiers (integer
//! division and min/max are emulated on older ones).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdtier::simd::{select, Float, Int, SimdAbs, SimdAdd, SimdCompare, SimdDiv, SimdMul};

/// Element counts. `f32` is 4 bytes, so 262_144 elements are 1 MiB.
const VECTOR_SIZES: &[usize] = &[
    1_024,      // 4 KiB
    16_384,     // 64 KiB
    262_144,    // 1 MiB
    4_194_304,  // 16 MiB
    16_777_216, // 64 MiB
];

/// Below this size the parallel kernels are all overhead.
const PARALLEL_SIZE_THRESHOLD: usize = 10_000;

fn generate_floats(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0.5f32..2.0)).collect()
}

fn generate_ints(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(1..1_000)).collect()
}

fn format_size(elements: usize) -> String {
    let bytes = elements * std::mem::size_of::<f32>();
    if bytes >= 1_048_576 {
        format!("{}_MiB", bytes / 1_048_576)
    } else {
        format!("{}_KiB", bytes / 1024)
    }
}

macro_rules! bench_binary_kernel {
    ($c:expr, $label:literal, $generate:ident, $simd:ident, $par:ident, $scalar:ident) => {
        for &size in VECTOR_SIZES {
            let mut group = $c.benchmark_group(format!("{}_{}", $label, format_size(size)));
            group.throughput(Throughput::Bytes((size * 4 * 2) as u64));

            let a = $generate(size, 42);
            let b = $generate(size, 7);
            let input = (a.as_slice(), b.as_slice());

            group.bench_with_input(BenchmarkId::new("scalar", size), &input, |bench, (a, b)| {
                bench.iter(|| black_box(a.$scalar(black_box(*b))))
            });
            group.bench_with_input(BenchmarkId::new("simd", size), &input, |bench, (a, b)| {
                bench.iter(|| black_box(a.$simd(black_box(*b))))
            });
            if size >= PARALLEL_SIZE_THRESHOLD {
                group.bench_with_input(
                    BenchmarkId::new("parallel_simd", size),
                    &input,
                    |bench, (a, b)| bench.iter(|| black_box(a.$par(black_box(*b)))),
                );
            }

            group.finish();
        }
    };
}

fn slice_kernels(c: &mut Criterion) {
    bench_binary_kernel!(c, "f32_add", generate_floats, simd_add, par_simd_add, scalar_add);
    bench_binary_kernel!(c, "f32_div", generate_floats, simd_div, par_simd_div, scalar_div);
    bench_binary_kernel!(c, "i32_mul", generate_ints, simd_mul, par_simd_mul, scalar_mul);
    bench_binary_kernel!(c, "i32_div", generate_ints, simd_div, par_simd_div, scalar_div);

    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("f32_abs_{}", format_size(size)));
        group.throughput(Throughput::Bytes((size * 4) as u64));

        let a = generate_floats(size, 42);
        group.bench_function(BenchmarkId::new("scalar", size), |bench| {
            bench.iter(|| black_box(a.as_slice().scalar_abs()))
        });
        group.bench_function(BenchmarkId::new("simd", size), |bench| {
            bench.iter(|| black_box(a.as_slice().simd_abs()))
        });
        if size >= PARALLEL_SIZE_THRESHOLD {
            group.bench_function(BenchmarkId::new("parallel_simd", size), |bench| {
                bench.iter(|| black_box(a.as_slice().par_simd_abs()))
            });
        }
        group.finish();
    }
}

fn vector_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("vector_ops_{}", simdtier::Tier::ACTIVE));

    let a = Int::from_slice(&generate_ints(Int::LANES, 42));
    let b = Int::from_slice(&generate_ints(Int::LANES, 7));
    let x = Float::from_slice(&generate_floats(Float::LANES, 42));
    let y = Float::from_slice(&generate_floats(Float::LANES, 7));

    group.bench_function("i32_div", |bench| {
        bench.iter(|| black_box(black_box(a) / black_box(b)))
    });
    group.bench_function("i32_min_max", |bench| {
        bench.iter(|| black_box(black_box(a).min(b).max(black_box(a))))
    });
    group.bench_function("f32_round", |bench| {
        bench.iter(|| black_box(black_box(x).round()))
    });
    group.bench_function("f32_select", |bench| {
        bench.iter(|| {
            let (x, y) = (black_box(x), black_box(y));
            black_box(select(x.simd_lt(y), x, y))
        })
    });
    group.bench_function("f32_rsqrt", |bench| {
        bench.iter(|| black_box(black_box(x).rsqrt()))
    });

    group.finish();
}

criterion_group!(benches, slice_kernels, vector_ops);
criterion_main!(benches);
