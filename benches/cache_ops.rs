#![allow(dead_code, unused)]
//! Benchmarks for cache facade operations and statement normalization.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quotekit::cache::{MemoryCache, MemoryStore, SettingsCache};
use quotekit::profiler::normalize_statement;
use serde_json::json;
use std::hint::black_box;
use tokio::runtime::Runtime;

/// Benchmark read-through gets against a warm and a cold cache.
fn bench_cache_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("cache_get");

    group.bench_function("hit", |b| {
        let cache = SettingsCache::new(MemoryCache::default(), MemoryStore::new());
        rt.block_on(cache.set("quote_prefix", &"INV", None));
        b.iter(|| rt.block_on(black_box(cache.get("quote_prefix", json!("Q")))))
    });

    group.bench_function("miss_with_backfill", |b| {
        b.iter_batched(
            || SettingsCache::new(MemoryCache::default(), MemoryStore::new()),
            |cache| rt.block_on(black_box(cache.get("quote_prefix", json!("Q")))),
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("composite_settings_hit", |b| {
        let cache = SettingsCache::new(MemoryCache::default(), MemoryStore::new());
        rt.block_on(cache.warm_cache());
        b.iter(|| rt.block_on(black_box(cache.get_settings())))
    });

    group.finish();
}

/// Benchmark explicit set/delete round trips.
fn bench_cache_write(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("cache_write");

    group.bench_function("set", |b| {
        let cache = SettingsCache::new(MemoryCache::default(), MemoryStore::new());
        b.iter(|| rt.block_on(black_box(cache.set("banner", &"maintenance", None))))
    });

    group.bench_function("set_then_delete", |b| {
        let cache = SettingsCache::new(MemoryCache::default(), MemoryStore::new());
        b.iter(|| {
            rt.block_on(async {
                cache.set("banner", &"maintenance", None).await;
                black_box(cache.delete("banner").await)
            })
        })
    });

    group.finish();
}

/// Benchmark SQL statement normalization at several statement sizes.
fn bench_normalize_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_statement");

    let short = "SELECT * FROM quotes WHERE id = 42";
    let medium = "SELECT q.id, q.status, c.name FROM quotes q \
                  JOIN clients c ON c.id = q.client_id \
                  WHERE q.status = 'pending' AND q.created_at > 1700000000 \
                  ORDER BY q.id LIMIT 50";
    let long = format!(
        "SELECT * FROM quotes WHERE id IN ({})",
        (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
    );

    for (name, sql) in [("short", short), ("medium", medium), ("long", long.as_str())] {
        group.throughput(Throughput::Bytes(sql.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), sql, |b, sql| {
            b.iter(|| black_box(normalize_statement(sql)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cache_get,
    bench_cache_write,
    bench_normalize_statement
);
criterion_main!(benches);
