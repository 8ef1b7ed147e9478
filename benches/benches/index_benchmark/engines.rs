//! Сравнение движков через общий трейт `OrderedMap` с `BTreeMap` как эталоном.

use std::{collections::BTreeMap, hint::black_box};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ordix::{OrderedMap, RbTreeMap, SkipList};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn shuffled(
    n: usize,
    seed: u64,
) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n as u64).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(seed));
    keys
}

/// Вставка всех ключей, поиск каждого второго и удаление четверти.
fn mixed_workload(
    map: &mut dyn OrderedMap<u64, u64>,
    keys: &[u64],
) -> usize {
    for &k in keys {
        map.insert(k, k);
    }
    let hits = keys.iter().step_by(2).filter(|k| map.get(k).is_some()).count();
    for k in keys.iter().step_by(4) {
        map.remove(k);
    }
    hits + map.len()
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines_mixed");
    for n in SIZES {
        let keys = shuffled(n, 17);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("skiplist", n), &keys, |b, keys| {
            b.iter(|| {
                let mut map = SkipList::<u64, u64>::with_seed(1);
                black_box(mixed_workload(&mut map, keys))
            })
        });

        group.bench_with_input(BenchmarkId::new("rbtree", n), &keys, |b, keys| {
            b.iter(|| {
                let mut map = RbTreeMap::<u64, u64>::new();
                black_box(mixed_workload(&mut map, keys))
            })
        });

        group.bench_with_input(BenchmarkId::new("btreemap", n), &keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                let hits = keys.iter().step_by(2).filter(|k| map.contains_key(k)).count();
                for k in keys.iter().step_by(4) {
                    map.remove(k);
                }
                black_box(hits + map.len())
            })
        });
    }
    group.finish();
}

fn bench_lower_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines_lower_bound");
    let n = 50_000;
    let keys: Vec<u64> = (0..n).map(|i| i * 2).collect();
    let probes = shuffled(1_000, 5);

    let skiplist: SkipList<u64, u64> = keys.iter().map(|k| (*k, *k)).collect();
    let rbtree: RbTreeMap<u64, u64> = keys.iter().map(|k| (*k, *k)).collect();
    let engines: [(&str, &dyn OrderedMap<u64, u64>); 2] =
        [("skiplist", &skiplist), ("rbtree", &rbtree)];

    for (name, map) in engines {
        group.bench_function(name, |b| {
            b.iter(|| {
                for p in &probes {
                    black_box(map.lower_bound(&(p * 97 + 1)));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mixed, bench_lower_bound);
criterion_main!(benches);
