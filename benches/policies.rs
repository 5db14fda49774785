//! Per-policy throughput of the bounded cache.
//!
//! Every group runs the same workload once per `EvictionPolicy`, so the
//! numbers compare the ordering indexes against each other.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use evictcache::{BoundedCache, CacheBuilder, EvictionPolicy};
use strum::IntoEnumIterator;

const CAPACITY: usize = 1024;
const OPS: u64 = 4096;

fn warm(policy: EvictionPolicy, capacity: usize) -> BoundedCache<u64, u64> {
    CacheBuilder::new(capacity)
        .policy(policy)
        .seed(0x5eed)
        .try_build_from((0..capacity as u64).map(|i| (i, i)))
        .expect("valid capacity")
}

/// Simple xorshift so every policy sees the same key stream.
fn key_stream(len: u64, range: u64) -> Vec<u64> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state % range
        })
        .collect()
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(OPS));
    let keys = key_stream(OPS, CAPACITY as u64);

    for policy in EvictionPolicy::iter() {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || warm(policy, CAPACITY),
                |mut cache| {
                    for key in &keys {
                        black_box(cache.get(black_box(key)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict");
    group.throughput(Throughput::Elements(OPS));

    for policy in EvictionPolicy::iter() {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || warm(policy, CAPACITY),
                |mut cache| {
                    for i in 0..OPS {
                        let _ = cache.insert(black_box(10_000 + i), i);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_workload");
    group.throughput(Throughput::Elements(OPS));
    // keys drawn from twice the capacity: roughly half the reads miss and insert
    let keys = key_stream(OPS, 2 * CAPACITY as u64);

    for policy in EvictionPolicy::iter() {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || warm(policy, CAPACITY),
                |mut cache| {
                    for &key in &keys {
                        if cache.get(&key).is_none() {
                            let _ = cache.insert(key, key);
                        }
                    }
                    black_box(cache.stats())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_with_listeners(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict_listeners");
    group.throughput(Throughput::Elements(OPS));

    for policy in [EvictionPolicy::Lru, EvictionPolicy::SecondChance] {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || {
                    let mut cache = warm(policy, CAPACITY);
                    cache.on_evicting(|_, key, value| {
                        black_box((key, value));
                        Ok(())
                    });
                    cache.on_evicted(|_, key, value| {
                        black_box((key, value));
                        Ok(())
                    });
                    cache
                },
                |mut cache| {
                    for i in 0..OPS {
                        let _ = cache.insert(black_box(10_000 + i), i);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_insert_evict,
    bench_mixed_workload,
    bench_with_listeners
);
criterion_main!(benches);
