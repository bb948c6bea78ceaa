use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use seurat::{BufferManager, PoolConfig};

fn benchmark_adaptive_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("AdaptivePool");

    for size in [256, 4096, 60_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("take_give_back", size),
            size,
            |b, &size| {
                let manager = BufferManager::new(PoolConfig::new(1 << 21, 1 << 16)).unwrap();
                // Warm the class so the steady state is pooled
                manager.give_back(manager.take(size)).unwrap();

                b.iter(|| {
                    let buffer = manager.take(size);
                    manager.give_back(buffer).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_pinned_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("PinnedPool");

    for size in [2000, 10_000, 60_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("take_give_back", size),
            size,
            |b, &size| {
                let config = PoolConfig::new(3 << 20, 1 << 16).with_prefer_pinned(true);
                let manager = BufferManager::new(config).unwrap();

                b.iter(|| {
                    let buffer = manager.take(size);
                    manager.give_back(buffer).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_pass_through_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("PassThrough");

    for size in [256, 4096, 60_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("take_give_back", size),
            size,
            |b, &size| {
                let manager = BufferManager::new(PoolConfig::new(0, 1 << 16)).unwrap();

                b.iter(|| {
                    let buffer = manager.take(size);
                    manager.give_back(buffer).unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_adaptive_round_trip,
    benchmark_pinned_round_trip,
    benchmark_pass_through_baseline,
);
criterion_main!(benches);
