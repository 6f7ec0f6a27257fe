// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logmerge_ordered_merge::merge_sorted;
use logmerge_test_utils::test_data::{entries, TestEntry};
use logmerge_test_utils::{RecordingSink, VecSource};
use std::hint::black_box;

fn make_sources(source_count: usize, per_source: u64) -> Vec<VecSource> {
    (0..source_count)
        .map(|s| {
            let timestamps: Vec<u64> = (0..per_source)
                .map(|i| i * source_count as u64 + s as u64)
                .collect();
            VecSource::new(entries("e", &timestamps))
        })
        .collect()
}

fn bench_merge_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sorted");
    for &source_count in &[4usize, 64, 1024] {
        let per_source = 10_000 / source_count as u64;
        group.throughput(Throughput::Elements(source_count as u64 * per_source));
        group.bench_with_input(
            BenchmarkId::from_parameter(source_count),
            &source_count,
            |b, &n| {
                b.iter_batched(
                    || make_sources(n, per_source),
                    |sources| {
                        let mut sink = RecordingSink::<TestEntry>::new();
                        let summary = merge_sorted(sources, &mut sink);
                        black_box(summary.map(|s| s.emitted).unwrap_or_default())
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_merge_sorted);
criterion_main!(benches);
