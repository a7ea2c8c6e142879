//! Ring construction and lookup benchmarks.
//!
//! Ambient performance tooling for the core ring component, not the
//! cluster-wide load-test harness (out of scope for this crate).

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ring::{Ring, RingConfig};

fn node_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("node-{i}:{}", 50051 + i)).collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_construction");
    for size in [3usize, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| Ring::new(node_ids(size), RingConfig::default()));
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_lookup");
    for size in [3usize, 10, 100] {
        let ring = Ring::new(node_ids(size), RingConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| ring.get_nodes("benchmark-key", 3));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_lookup);
criterion_main!(benches);
