//! Criterion benchmarks for phase unwrapping on the reference profiles.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use phasekit_bench::{reference_profile, stress_profile};
use phasekit_unwrap::{itoh_rows, unwrap_ls, wrapped_gradient, LsConfig};

/// Benchmark: least-squares unwrap of the 100x100 reference profile.
fn bench_unwrap_ls_reference(c: &mut Criterion) {
    let p = reference_profile().unwrap();
    let cfg = LsConfig::default();
    c.bench_function("unwrap_ls_reference", |b| {
        b.iter(|| black_box(unwrap_ls(black_box(&p.wrapped), &p.mask, &cfg).unwrap()));
    });
}

/// Benchmark: least-squares unwrap of the 300x300 stress profile.
fn bench_unwrap_ls_stress(c: &mut Criterion) {
    let p = stress_profile().unwrap();
    let cfg = LsConfig::default();
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("unwrap_ls_stress", |b| {
        b.iter(|| black_box(unwrap_ls(&p.wrapped, &p.mask, &cfg).unwrap()));
    });
    group.finish();
}

/// Benchmark: the cheap stages on their own.
fn bench_baselines(c: &mut Criterion) {
    let p = stress_profile().unwrap();
    c.bench_function("itoh_rows_300", |b| {
        b.iter(|| black_box(itoh_rows(black_box(&p.wrapped))));
    });
    c.bench_function("wrapped_gradient_300", |b| {
        b.iter(|| black_box(wrapped_gradient(&p.wrapped, &p.mask).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_unwrap_ls_reference,
    bench_unwrap_ls_stress,
    bench_baselines
);
criterion_main!(benches);
