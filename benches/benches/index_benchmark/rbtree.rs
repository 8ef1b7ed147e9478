use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use ordix::{RbTree, RbTreeMap};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn make_sample_keys(
    n: usize,
    seed: u64,
) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen()).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rbtree_insert");
    for &n in &[1_000usize, 10_000, 50_000] {
        let random = make_sample_keys(n, 42);
        let ascending: Vec<i64> = (0..n as i64).collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("random", n), &random, |b, keys| {
            b.iter(|| black_box(keys.iter().copied().collect::<RbTree<i64>>()))
        });

        // Возрастающие ключи: худший случай для несбалансированного дерева.
        group.bench_with_input(BenchmarkId::new("ascending", n), &ascending, |b, keys| {
            b.iter(|| black_box(keys.iter().copied().collect::<RbTree<i64>>()))
        });
    }
    group.finish();
}

fn bench_map_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("rbtree_map_get");
    for &n in &[1_000usize, 10_000, 50_000] {
        let keys = make_sample_keys(n, 7);
        let map: RbTreeMap<i64, i64> = keys.iter().map(|k| (*k, *k)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                for k in keys.iter().take(1_000) {
                    black_box(map.get(k));
                }
            })
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("rbtree_delete");
    for &n in &[1_000usize, 10_000] {
        let keys = make_sample_keys(n, 99);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter_batched(
                || keys.iter().copied().collect::<RbTree<i64>>(),
                |mut tree| {
                    for k in keys {
                        black_box(tree.delete(k));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let tree: RbTree<i64> = make_sample_keys(10_000, 3).into_iter().collect();
    c.bench_function("rbtree_validate_10000", |b| {
        b.iter(|| black_box(tree.validate_invariants()))
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_map_lookup,
    bench_delete,
    bench_validate
);
criterion_main!(benches);
