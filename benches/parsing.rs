//! Criterion benchmarks for URI parsing, canonicalization, and path-set
//! matching.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use resource_uri::{PathSet, ResourceUri};

/// Benchmark: `ResourceUri::parse` with inputs of varying shape.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = [
        ("minimal", "/a"),
        ("typical", "http://localhost:4502/content/site/page.html"),
        (
            "selectors",
            "http://localhost:4502/content/site/page.print.a4.html/extra/info",
        ),
        (
            "parameters",
            "http://host/content;v='1.0'/page;lang='fr'.html",
        ),
        (
            "full",
            "https://admin@host.example:8443/content/site/page.print.html/extra?wcmmode=disabled#section",
        ),
        ("opaque", "mailto:jon.doe@example.com"),
        ("malformed", "http://host:not-a-port/content/page.html"),
    ];

    for (name, uri) in test_cases {
        group.throughput(Throughput::Bytes(uri.len() as u64));
        group.bench_with_input(BenchmarkId::new("uri", name), &uri, |b, uri| {
            b.iter(|| ResourceUri::parse(black_box(uri)));
        });
    }

    group.finish();
}

/// Benchmark: canonical string generation.
fn bench_canonical(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical");

    let test_cases = [
        ("path_only", "/content/site/page.html"),
        (
            "full",
            "https://host:8443/content/site/page.print.html/extra?x=1#frag",
        ),
        ("opaque", "mailto:jon.doe@example.com"),
    ];

    for (name, uri_str) in test_cases {
        let uri = ResourceUri::parse(uri_str);
        group.bench_with_input(BenchmarkId::new("canonical", name), &uri, |b, uri| {
            b.iter(|| black_box(uri).to_string());
        });
    }

    group.finish();
}

/// Benchmark: path-set construction at sizes straddling the pairwise limit.
fn bench_path_set_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_set_build");

    for size in [4usize, 8, 16, 64, 256] {
        let paths: Vec<String> = (0..size)
            .map(|i| format!("/content/branch{}/sub{}", i % 16, i))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("literals", size), &paths, |b, paths| {
            b.iter(|| PathSet::from_paths(black_box(paths)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: membership checks against sets of varying size.
fn bench_path_set_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_set_match");

    for size in [4usize, 64, 256] {
        let paths: Vec<String> = (0..size).map(|i| format!("/content/branch{i}")).collect();
        let set = PathSet::from_paths(&paths).unwrap();
        let hit = format!("/content/branch{}/deep/page", size / 2);

        group.bench_with_input(BenchmarkId::new("hit", size), &set, |b, set| {
            b.iter(|| set.matches(black_box(&hit)));
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &set, |b, set| {
            b.iter(|| set.matches(black_box("/elsewhere/entirely")));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_canonical,
    bench_path_set_build,
    bench_path_set_match,
);
criterion_main!(benches);
