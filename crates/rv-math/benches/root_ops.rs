//! Criterion benchmarks for the ranking primitives and the scalar root finder.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rv_math::{find_root, rank_max_ties, step_down_min, RootOptions};

fn make_values(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            // Deterministic scatter with repeated values every 7th entry.
            let k = if i % 7 == 0 { 7 } else { i };
            ((k * 7919) % 1000) as f64 / 1000.0
        })
        .collect()
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("order/rank_max_ties");
    for n in [10, 100, 1_000, 10_000] {
        let values = make_values(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, v| {
            b.iter(|| black_box(rank_max_ties(black_box(v))))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("order/step_down_min");
    for n in [10, 100, 1_000, 10_000] {
        let values = make_values(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, v| {
            b.iter(|| black_box(step_down_min(black_box(v))))
        });
    }
    group.finish();
}

fn bench_find_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("root/find_root");
    for xtol in [1e-4, 1e-8, 0.0] {
        let opts = RootOptions::default().with_xtol(xtol).with_bounds(0.0, 1.0);
        group.bench_with_input(
            BenchmarkId::new("piecewise", format!("{xtol:e}")),
            &opts,
            |b, o| {
                b.iter(|| {
                    let sol = find_root(
                        |x| (0.004 + 0.008 * x).max(0.006) - x,
                        black_box(0.5),
                        o,
                    );
                    black_box(sol.map(|s| s.root).unwrap_or(f64::NAN))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_ranking, bench_find_root);
criterion_main!(benches);
