//! Criterion micro-benchmarks for the SOR Poisson solver.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use phasekit_solver::{interior, laplacian, membrane_sor, SorConfig, SweepOrder};
use phasekit_test_utils::{circle_mask, disc_source};

/// Benchmark: full solve on a disc at three grid sizes.
fn bench_membrane_sor_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("membrane_sor");
    group.sample_size(10);
    for n in [64usize, 128, 256] {
        let centre = (n as f64 - 1.0) / 2.0;
        let free = interior(&circle_mask((n, n), centre, centre, 0.45 * n as f64));
        let source = disc_source((n, n), centre, centre, 0.15 * n as f64);
        let cfg = SorConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let out = membrane_sor(black_box(&source), &free, &cfg).unwrap();
                black_box(out);
            });
        });
    }
    group.finish();
}

/// Benchmark: lexicographic vs red-black ordering at a fixed sweep count.
fn bench_sweep_order(c: &mut Criterion) {
    let n = 128;
    let centre = (n as f64 - 1.0) / 2.0;
    let free = interior(&circle_mask((n, n), centre, centre, 60.0));
    let source = disc_source((n, n), centre, centre, 20.0);

    let mut group = c.benchmark_group("sweep_order_200");
    for (name, order) in [
        ("lexicographic", SweepOrder::Lexicographic),
        ("red_black", SweepOrder::RedBlack),
    ] {
        let cfg = SorConfig::builder()
            .tolerance(0.0)
            .max_iterations(200)
            .order(order)
            .build()
            .unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(membrane_sor(&source, &free, &cfg).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: 5-point Laplacian of a 256x256 field.
fn bench_laplacian_256(c: &mut Criterion) {
    let u = disc_source((256, 256), 127.5, 127.5, 80.0);
    c.bench_function("laplacian_256", |b| {
        b.iter(|| black_box(laplacian(black_box(&u))));
    });
}

criterion_group!(
    benches,
    bench_membrane_sor_sizes,
    bench_sweep_order,
    bench_laplacian_256
);
criterion_main!(benches);
