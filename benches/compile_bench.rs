//! Benchmarks for filter compilation and in-memory execution.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sift_query::compile::compile;
use sift_query::query::ApplyFilter;
use sift_query::{filter_shape, record};

record! {
    struct Address {
        city: String,
    }
}

record! {
    struct Person {
        name: String,
        age: i64,
        address: nested Address,
    }
}

filter_shape! {
    struct PersonFilter {
        name: String,
        age: i64 [op = "gte"],
        city: String [path = "address.city"],
    }
}

fn people(count: usize) -> Vec<Person> {
    (0..count)
        .map(|i| Person {
            name: format!("person-{i}"),
            age: (i % 80) as i64,
            address: Address {
                city: format!("city-{}", i % 25),
            },
        })
        .collect()
}

// ============================================================================
// Compilation Benchmarks
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    let empty = PersonFilter::new().unwrap();
    group.bench_function("empty_filter", |b| {
        b.iter(|| black_box(compile::<_, Person>(&empty).unwrap()))
    });

    let mut bound = PersonFilter::new().unwrap();
    bound.name = Some("person-7".into());
    bound.age = Some(30);
    bound.city = Some("city-3".into());
    group.bench_function("three_criteria", |b| {
        b.iter(|| black_box(compile::<_, Person>(&bound).unwrap()))
    });

    let mut fuzzy = PersonFilter::new().unwrap();
    fuzzy.params.fuzzy_term = Some("son-1".into());
    group.bench_function("fuzzy_term", |b| {
        b.iter(|| black_box(compile::<_, Person>(&fuzzy).unwrap()))
    });

    let mut ordered = PersonFilter::new().unwrap();
    ordered.params.order_by = Some("City".into());
    group.bench_function("with_order_by", |b| {
        b.iter(|| black_box(compile::<_, Person>(&ordered).unwrap()))
    });

    group.finish();
}

// ============================================================================
// Execution Benchmarks
// ============================================================================

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("predicate_scan", size), &size, |b, &n| {
            let mut filter = PersonFilter::new().unwrap();
            filter.age = Some(40);
            b.iter_batched(
                || people(n),
                |rows| black_box(filter.apply_filter(rows).unwrap()),
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("scan_sort_page", size), &size, |b, &n| {
            let mut filter = PersonFilter::new().unwrap();
            filter.age = Some(20);
            filter.params.order_by = Some("name".into());
            b.iter_batched(
                || people(n),
                |rows| black_box(filter.apply_filter(rows).unwrap().execute().unwrap()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_execute);
criterion_main!(benches);
