//! Criterion benchmarks for seeded allocation workloads.

use std::hint::black_box;

use chunkfit_arena::{Arena, ArenaConfig};
use chunkfit_bench::{reference_profile, replay, stress_profile};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_reference_10k(c: &mut Criterion) {
    let ops = reference_profile(42).ops();
    c.bench_function("reference_10k", |b| {
        b.iter(|| {
            let mut arena: Arena = Arena::with_config(ArenaConfig::adjacent());
            black_box(replay(&mut arena, &ops));
        });
    });
}

fn bench_stress_10k(c: &mut Criterion) {
    let ops = stress_profile(42).ops();
    c.bench_function("stress_10k", |b| {
        b.iter(|| {
            let mut arena: Arena = Arena::with_config(ArenaConfig::adjacent());
            black_box(replay(&mut arena, &ops));
        });
    });
}

fn bench_reference_10k_legacy(c: &mut Criterion) {
    let ops = reference_profile(42).ops();
    c.bench_function("reference_10k_legacy", |b| {
        b.iter(|| {
            let mut arena: Arena = Arena::new();
            black_box(replay(&mut arena, &ops));
        });
    });
}

criterion_group!(
    benches,
    bench_reference_10k,
    bench_stress_10k,
    bench_reference_10k_legacy
);
criterion_main!(benches);
