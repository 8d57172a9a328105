use core_sexp::{parse, parse_with, ParseLimits, MAX_NESTING_DEPTH};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const CERTIFICATE: &[u8] = b"(11:certificate(6:issuer3:bob)(7:subject5:alice)(5:level(1:*5:range7:numeric2:ge3:100))(5:fruit(1:*3:set5:apple6:orange5:lemon)))";

/// Generate a list nested `depth` levels deep
fn generate_nested(depth: usize) -> Vec<u8> {
    let mut input = "(1:a".repeat(depth);
    input.push_str(&")".repeat(depth));
    input.into_bytes()
}

/// Generate a flat list with `width` atom parts
fn generate_wide(width: usize) -> Vec<u8> {
    let mut input = String::from("(4:wide");
    for i in 0..width {
        let part = format!("item{}", i);
        input.push_str(&format!("{}:{}", part.len(), part));
    }
    input.push(')');
    input.into_bytes()
}

fn benchmark_certificate(c: &mut Criterion) {
    c.bench_function("parse_certificate", |b| {
        b.iter(|| parse(black_box(CERTIFICATE)));
    });
}

fn benchmark_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_nesting_depth");
    let limits = ParseLimits::default().with_max_depth(MAX_NESTING_DEPTH);

    for depth in [8, 64, 128, MAX_NESTING_DEPTH].iter() {
        let input = generate_nested(*depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            b.iter(|| parse_with(black_box(&input), &limits));
        });
    }

    group.finish();
}

fn benchmark_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_width");

    for width in [10, 100, 1000].iter() {
        let input = generate_wide(*width);
        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, _| {
            b.iter(|| parse(black_box(&input)));
        });
    }

    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let expr = parse(CERTIFICATE).unwrap();

    c.bench_function("encode_certificate", |b| {
        b.iter(|| black_box(&expr).to_canonical());
    });
}

criterion_group!(
    benches,
    benchmark_certificate,
    benchmark_nesting_depth,
    benchmark_width,
    benchmark_encode
);
criterion_main!(benches);
