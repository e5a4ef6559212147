//! Comparison pipeline benchmark
//!
//! Measures the cost of the per-test statistics (outlier rejection and the
//! t-test) and of a full before/after run across all seven default tests.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench comparison_pipeline
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perfcmp::comparison::{filter_outliers, run_comparison, ttest_ind, Direction};
use perfcmp::dataset::{TabularDataset, DEFAULT_LABELS};

/// Deterministic measurement series with jitter and an occasional spike
fn create_bench_series(len: usize, base: f64, seed: u64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    (0..len)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let jitter = (state >> 33) as f64 / (1u64 << 31) as f64;
            if i % 50 == 49 {
                base * 10.0
            } else {
                base + jitter
            }
        })
        .collect()
}

fn create_bench_dataset(runs: usize, shift: f64, seed: u64) -> TabularDataset {
    let columns = (0..DEFAULT_LABELS.len())
        .map(|col| create_bench_series(runs, 100.0 + col as f64 * 10.0 + shift, seed + col as u64))
        .collect();
    TabularDataset::from_columns(columns)
}

/// Benchmark: MAD outlier rejection for one test column
fn bench_filter_outliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_outliers");

    for runs in [10, 100, 1000] {
        let series = create_bench_series(runs, 100.0, 7);
        group.bench_with_input(BenchmarkId::from_parameter(runs), &series, |b, series| {
            b.iter(|| black_box(filter_outliers(black_box(series), "bench")));
        });
    }

    group.finish();
}

/// Benchmark: Student's t-test including the incomplete beta p-value
fn bench_ttest(c: &mut Criterion) {
    let old = create_bench_series(100, 100.0, 1);
    let new = create_bench_series(100, 100.5, 2);

    c.bench_function("ttest_ind_100", |b| {
        b.iter(|| black_box(ttest_ind(black_box(&old), black_box(&new))));
    });
}

/// Benchmark: full run over seven tests
fn bench_run_comparison(c: &mut Criterion) {
    let labels: Vec<String> = DEFAULT_LABELS.iter().map(|s| s.to_string()).collect();
    let mut group = c.benchmark_group("run_comparison");

    for runs in [10, 100, 1000] {
        let before = create_bench_dataset(runs, 0.0, 11);
        let after = create_bench_dataset(runs, 1.0, 23);
        group.bench_with_input(
            BenchmarkId::from_parameter(runs),
            &(before, after),
            |b, (before, after)| {
                b.iter(|| {
                    black_box(run_comparison(
                        black_box(before),
                        black_box(after),
                        &labels,
                        Direction::HigherIsBetter,
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_filter_outliers,
    bench_ttest,
    bench_run_comparison
);
criterion_main!(benches);
