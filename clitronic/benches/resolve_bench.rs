use clitronic::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_resolve(c: &mut Criterion) {
    let catalog = builtin_catalog();

    c.bench_function("resolve_exact_id", |b| {
        b.iter(|| catalog.resolve(black_box("rgb-led")))
    });

    c.bench_function("resolve_description_tier", |b| {
        b.iter(|| catalog.resolve(black_box("light sensor")))
    });

    c.bench_function("resolve_miss", |b| {
        b.iter(|| catalog.resolve(black_box("warp drive")))
    });
}

fn bench_search(c: &mut Criterion) {
    let catalog = builtin_catalog();
    let query = SearchQuery::in_category(Category::Output).with_keyword("led");

    c.bench_function("search_category_keyword", |b| {
        b.iter(|| catalog.search(black_box(&query)))
    });
}

criterion_group!(benches, bench_resolve, bench_search);
criterion_main!(benches);
