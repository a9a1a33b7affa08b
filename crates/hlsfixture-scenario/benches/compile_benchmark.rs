//! Benchmarks for hlsfixture-scenario.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hlsfixture_scenario::{parse, resolve, timeline, Scenario, SEGMENT_LENGTH};

/// Scenario strings of increasing size
const SAMPLES: &[(&str, &str)] = &[
    ("empty", "/"),
    ("basic", "/s5-p30-r10"),
    ("errors", "/s2-p20-r5-e404-p10-e503-r3-e500"),
    (
        "long",
        "/s5-p30-r10-p60-r5-e404-p30-r15-e503-p120-r2-r2-r2-e500-p45-e-p10-r30",
    ),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, path) in SAMPLES {
        group.throughput(Throughput::Bytes(path.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), path, |b, path| {
            b.iter(|| parse(black_box(path)))
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for (name, path) in SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(name), path, |b, path| {
            b.iter(|| Scenario::compile(black_box(path)))
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let ops = parse(SAMPLES[3].1);
    let timeline = timeline::build(&ops);

    c.bench_function("resolve_all_segments", |b| {
        b.iter(|| {
            for index in 0..64u64 {
                black_box(resolve(&timeline, black_box(index), SEGMENT_LENGTH));
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_compile, bench_resolve);
criterion_main!(benches);
