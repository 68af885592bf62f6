//! Filter performance benchmarks.
//!
//! Measures filtering cost as record and channel counts grow, and the cost of
//! the per-channel UV radius and SNR tests.

mod synthetic;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use oifits::{Bounds, FilterEngine, FilterSpec};
use synthetic::Shape;

/// Benchmark the accept-everything filter over growing datasets.
fn bench_default_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("default_filter");
    let engine = FilterEngine::new(FilterSpec::default());

    for records in [100, 1_000, 10_000] {
        let dataset = synthetic::dataset(Shape::new(5, records, 32), "INS", 7);
        group.bench_with_input(BenchmarkId::new("records", records), &dataset, |b, dataset| {
            b.iter(|| black_box(engine.apply(dataset)))
        });
    }

    group.finish();
}

/// Benchmark filters that select subsets.
fn bench_selective_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("selective_filter");
    let dataset = synthetic::dataset(Shape::new(10, 2_000, 64), "INS", 11);

    let specs = [
        ("target", FilterSpec::new().with_target_id(3)),
        (
            "wavelength",
            FilterSpec::new().with_wavelength_range(Bounds::new(1.6e-6, 1.8e-6)),
        ),
        (
            "baseline",
            FilterSpec::new().with_baseline_range(Bounds::new(40.0, 100.0)),
        ),
        (
            "uv_radius",
            FilterSpec::new().with_uv_radius_range(Bounds::at_most(5e7)),
        ),
        (
            "snr",
            FilterSpec::new()
                .with_snr_range(Bounds::at_least(5.0))
                .with_accept_flagged(false),
        ),
    ];

    for (name, spec) in specs {
        let engine = FilterEngine::new(spec);
        group.bench_function(name, |b| b.iter(|| black_box(engine.apply(&dataset))));
    }

    group.finish();
}

/// Benchmark scaling with channel count.
fn bench_channel_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_scaling");
    let engine = FilterEngine::new(FilterSpec::new().with_snr_range(Bounds::at_least(3.0)));

    for nwave in [1, 16, 256, 1_024] {
        let dataset = synthetic::dataset(Shape::new(3, 500, nwave), "INS", 13);
        group.bench_with_input(BenchmarkId::new("nwave", nwave), &dataset, |b, dataset| {
            b.iter(|| black_box(engine.apply(dataset)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_default_filter,
    bench_selective_filters,
    bench_channel_scaling,
);

criterion_main!(benches);
