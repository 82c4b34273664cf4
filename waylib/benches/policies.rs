use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use waylib::cache::Cache;
use waylib::replacement::Policy;

/// Replays one synthetic reference stream through each replacement policy
///
/// The stride pattern wraps a region larger than the cache, so every policy
/// has to make real eviction decisions rather than filling cold slots
pub fn policy_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Policies");
    let references: Vec<u64> = (0..100_000u64).map(|i| (i * 17) % 8192).collect();
    for policy in [Policy::Lfu, Policy::Lru, Policy::Fifo] {
        group.bench_with_input(
            BenchmarkId::new("replay", policy.to_string()),
            &references,
            |bench, references| {
                bench.iter(|| {
                    let mut cache = Cache::new(4, 256, 4, policy).unwrap();
                    cache.access_many(references.iter().copied()).unwrap();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = policy_benchmark
);
criterion_main!(benches);
