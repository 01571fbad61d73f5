//! Criterion benchmarks for template parsing, rendering, and the query codec.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use safe_navigation::{
    ParamMap, PathTemplate, RouteOptions, SchemaPair, SerdeSchema, decode_query, encode_query,
    make_route_builder,
};

/// Benchmark: PathTemplate::parse with varying template shapes
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = [
        ("static", "/settings/profile"),
        ("single", "/organizations/[orgId]"),
        ("multiple", "/organizations/[orgId]/users/[userId]/logs"),
        ("catch_all", "/organization/[orgId]/c/[...catch_all]"),
        ("optional_catch_all", "/docs/[[...slug]]"),
    ];

    for (name, template) in test_cases {
        group.throughput(Throughput::Bytes(template.len() as u64));
        group.bench_with_input(BenchmarkId::new("template", name), &template, |b, template| {
            b.iter(|| PathTemplate::parse(black_box(template)));
        });
    }

    group.finish();
}

/// Benchmark: PathTemplate::render with catch-all lists of varying length
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let template =
        PathTemplate::parse("/organization/[orgId]/c/[...catch_all]").expect("valid template");

    for depth in [1, 4, 16] {
        let segments: Vec<String> = (0..depth).map(|i| format!("segment_{i}")).collect();
        let values = ParamMap::new()
            .with("orgId", "org_123")
            .with("catch_all", segments);

        group.bench_with_input(BenchmarkId::new("depth", depth), &values, |b, values| {
            b.iter(|| template.render(black_box(values)));
        });
    }

    group.finish();
}

/// Benchmark: query encoding and decoding
fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let search = ParamMap::new()
        .with("query", "john doe")
        .with("filters", ["active", "is_admin", "inactive"])
        .with("order", "date");
    let encoded = encode_query(&search);

    group.bench_function("encode", |b| {
        b.iter(|| encode_query(black_box(&search)));
    });

    group.bench_function("decode", |b| {
        b.iter(|| decode_query(black_box(Some(encoded.as_str()))));
    });

    group.finish();
}

/// Benchmark: RouteBuilder::href with params and search
fn bench_href(c: &mut Criterion) {
    let mut group = c.benchmark_group("href");

    let builder = make_route_builder(
        "/organizations/[orgId]/users",
        SchemaPair::new()
            .with_params(SerdeSchema::<serde_json::Value>::new())
            .with_search(SerdeSchema::<serde_json::Value>::new()),
    )
    .expect("valid route");

    let params_only = RouteOptions::new().param("orgId", "org_123");
    let with_search = params_only
        .clone()
        .search_param("query", "john doe")
        .search_param("filters", ["active", "is_admin"]);

    group.bench_function("params_only", |b| {
        b.iter(|| builder.href(black_box(&params_only)));
    });

    group.bench_function("with_search", |b| {
        b.iter(|| builder.href(black_box(&with_search)));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render, bench_query, bench_href);
criterion_main!(benches);
