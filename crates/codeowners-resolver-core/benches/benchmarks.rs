//! Benchmarks for codeowners-resolver-core
//!
//! Run with: cargo bench -p codeowners-resolver-core
//!
//! Filter benchmarks:
//!   cargo bench -- "parsing"
//!   cargo bench -- "resolution"

use codeowners_resolver_core::{Resolver, parse_codeowners, resolve, scan_document};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use fixtures::{fixtures, query_paths};

/// Benchmark parsing across all fixture sizes
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for (name, content) in fixtures() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_codeowners", name),
            content,
            |b, input| b.iter(|| parse_codeowners(std::hint::black_box(input))),
        );
        group.bench_with_input(BenchmarkId::new("scan_document", name), content, |b, input| {
            b.iter(|| scan_document(std::hint::black_box(input)).count())
        });
    }
    group.finish();
}

/// Benchmark resolving a batch of paths, precompiled and compiled on the fly
fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    let paths = query_paths();

    for (name, content) in fixtures() {
        let rules = parse_codeowners(content);
        let resolver = Resolver::new(rules.clone());
        group.throughput(Throughput::Elements(paths.len() as u64));

        group.bench_with_input(BenchmarkId::new("resolver", name), &resolver, |b, resolver| {
            b.iter(|| {
                for path in paths {
                    std::hint::black_box(resolver.resolve(path, false));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("compile", name), &rules, |b, rules| {
            b.iter(|| Resolver::new(std::hint::black_box(rules.clone())))
        });
    }

    // Compiling per query only makes sense for small documents
    if let Some((name, content)) = fixtures().first() {
        let rules = parse_codeowners(content);
        group.bench_with_input(BenchmarkId::new("resolve_uncompiled", name), &rules, |b, rules| {
            b.iter(|| {
                for path in paths.iter().take(20) {
                    std::hint::black_box(resolve(rules, path, false));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parsing, bench_resolution);
criterion_main!(benches);
