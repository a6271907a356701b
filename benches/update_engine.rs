// SPDX-License-Identifier: MPL-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use intervalidus::{interval, DataStore, Interval1D, Interval2D, ValidData};

fn line_rewrites(c: &mut Criterion) {
    c.bench_function("set 1000 overlapping segments", |b| {
        b.iter(|| {
            let mut store: DataStore<u32, Interval1D<i64>> = DataStore::new();
            for i in 0..1000i64 {
                store.set(ValidData::new(interval(i * 3, i * 3 + 40), (i % 7) as u32));
            }
            store
        })
    });

    c.bench_function("carve 200 removals out of one segment", |b| {
        b.iter(|| {
            let mut store: DataStore<u32, Interval1D<i64>> = DataStore::new();
            store.set(ValidData::new(interval(0, 10_000), 0u32));
            for i in 0..200i64 {
                store.remove(&interval(i * 50 + 10, i * 50 + 20));
            }
            store
        })
    });
}

fn grid_rewrites(c: &mut Criterion) {
    c.bench_function("tile a plane with 400 overlapping rectangles", |b| {
        b.iter(|| {
            let mut store: DataStore<u32, Interval2D<i32, i32>> = DataStore::new();
            for i in 0..400i32 {
                let h = (i * 7) % 300;
                let v = (i * 13) % 300;
                store.set(ValidData::new(
                    Interval2D::new(interval(h, h + 25), interval(v, v + 25)),
                    (i % 5) as u32,
                ));
            }
            store
        })
    });
}

criterion_group!(benches, line_rewrites, grid_rewrites);
criterion_main!(benches);
