//! Benchmarks for fuzzy inference operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fuzzy_suction::reference;
use fuzzy_suction::{MembershipFunction, Universe};

fn membership_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership");

    let triangle = MembershipFunction::triangular(3.0, 5.0, 7.0).unwrap();
    group.bench_function("triangular_evaluate", |b| {
        b.iter(|| black_box(triangle.evaluate(black_box(4.2))))
    });

    for points in [11usize, 101, 1001] {
        let universe = Universe::linspace(0.0, 10.0, points).unwrap();
        group.bench_with_input(BenchmarkId::new("sample", points), &universe, |b, u| {
            b.iter(|| black_box(triangle.sample(u)))
        });
    }

    group.finish();
}

fn engine_benchmark(c: &mut Criterion) {
    let engine = reference::engine().unwrap();
    let mut group = c.benchmark_group("engine");

    group.bench_function("compute_suction", |b| {
        b.iter(|| reference::suction_level(&engine, black_box(3.7), black_box(2.2)))
    });

    group.bench_function("run_session", |b| {
        b.iter(|| reference::run(&engine, black_box(4.5), black_box(1.5)))
    });

    group.bench_function("build_engine", |b| b.iter(reference::engine));

    group.finish();
}

criterion_group!(benches, membership_benchmark, engine_benchmark);

criterion_main!(benches);
