use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ordix::{FixedLevels, NaturalOrder, SkipList};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn make_sample_keys(
    n: usize,
    seed: u64,
) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(i64::MIN..=i64::MAX)).collect()
}

fn filled(keys: &[i64]) -> SkipList<i64, i64> {
    let mut sl = SkipList::with_seed(1);
    for k in keys {
        sl.insert(*k, *k);
    }
    sl
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("skiplist_insert");
    for &n in &[1_000usize, 10_000, 50_000] {
        let keys = make_sample_keys(n, 42);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| black_box(filled(keys)))
        });
    }
    group.finish();
}

fn bench_search_hit_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("skiplist_search");
    for &n in &[1_000usize, 10_000, 50_000] {
        let keys = make_sample_keys(n, 123);
        let sl = filled(&keys);
        let misses = make_sample_keys(1_000, 9_999);

        group.bench_with_input(BenchmarkId::new("search_hit", n), &n, |b, _| {
            b.iter(|| {
                for k in keys.iter().take(1_000) {
                    black_box(sl.get(k));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("search_miss", n), &n, |b, _| {
            b.iter(|| {
                for k in &misses {
                    black_box(sl.get(k));
                }
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("skiplist_remove");
    for &n in &[1_000usize, 10_000] {
        let keys = make_sample_keys(n, 777);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter_batched(
                || filled(keys),
                |mut sl| {
                    for k in keys {
                        black_box(sl.remove(k));
                    }
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_iterate_and_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("skiplist_scan");
    for &n in &[1_000usize, 10_000, 50_000] {
        let mut keys = make_sample_keys(n, 2026);
        let sl = filled(&keys);
        keys.sort_unstable();
        let (start, end) = (keys[n / 4], keys[n / 2]);

        group.bench_with_input(BenchmarkId::new("iterate", n), &n, |b, _| {
            b.iter(|| {
                for (k, v) in sl.iter() {
                    black_box((k, v));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("range_quarter", n), &n, |b, _| {
            b.iter(|| black_box(sl.range(&start, &end).count()))
        });
    }
    group.finish();
}

/// Одноуровневый список: поиск вырождается в линейный.
fn bench_degenerate_single_level(c: &mut Criterion) {
    let keys = make_sample_keys(2_000, 5);
    let mut sl = SkipList::with_parts(NaturalOrder, FixedLevels(1));
    for k in &keys {
        sl.insert(*k, *k);
    }

    c.bench_function("skiplist_single_level_search_2000", |b| {
        b.iter(|| {
            for k in keys.iter().take(100) {
                black_box(sl.get(k));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_search_hit_miss,
    bench_remove,
    bench_iterate_and_range,
    bench_degenerate_single_level
);
criterion_main!(benches);
