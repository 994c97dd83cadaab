//! Criterion micro-benchmarks for the reference table.
//!
//! `push` is deliberately O(n) per call (exact-size regrow), so the
//! push bench measures the quadratic fill, not amortized growth.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stash_array::{Array, TypeTag, ValueRef};
use stash_bench::shuffled_ints;

fn build_array(values: &[i64]) -> Array {
    let mut arr = Array::new(TypeTag::Integer);
    for &v in values {
        arr.push(ValueRef::int(v)).expect("push");
    }
    arr
}

fn bench_push(c: &mut Criterion) {
    let values = shuffled_ints(1_000, 1_000_000, 7);
    c.bench_function("array/push_1k_exact_regrow", |b| {
        b.iter(|| {
            let arr = build_array(black_box(&values));
            black_box(arr.len())
        });
    });
}

fn bench_sort(c: &mut Criterion) {
    let values = shuffled_ints(1_000, 1_000_000, 7);
    c.bench_function("array/sort_1k", |b| {
        b.iter_batched(
            || build_array(&values),
            |mut arr| {
                arr.sort();
                black_box(arr.sum())
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_reverse(c: &mut Criterion) {
    let values = shuffled_ints(1_000, 1_000_000, 7);
    c.bench_function("array/reverse_1k", |b| {
        b.iter_batched(
            || build_array(&values),
            |mut arr| {
                arr.reverse().expect("reverse");
                black_box(arr.len())
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_push, bench_sort, bench_reverse);
criterion_main!(benches);
