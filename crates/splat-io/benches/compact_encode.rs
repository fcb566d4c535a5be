use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use splat_core::schema::{CANONICAL_ORDER, REQUIRED_ATTRIBUTES};
use splat_core::{encode_compact, standardize, AttributeStore, QuaternionConvention};
use splat_io::encode_ply;

fn source_store(num_points: usize) -> AttributeStore {
    let columns = REQUIRED_ATTRIBUTES.iter().enumerate().map(|(c, name)| {
        let values = (0..num_points)
            .map(|i| ((i * 31 + c * 7) % 97) as f32 / 97.0 - 0.5)
            .collect::<Vec<f32>>();
        (*name, values)
    });
    AttributeStore::from_columns(QuaternionConvention::Wxyz, columns).unwrap()
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    for num_points in [10_000usize, 100_000] {
        let source = source_store(num_points);
        let (standard, _) = standardize(&source).unwrap();

        group.bench_with_input(BenchmarkId::new("standardize", num_points), &source, |b, s| {
            b.iter(|| standardize(black_box(s)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("encode_compact", num_points), &standard, |b, s| {
            b.iter(|| encode_compact(black_box(s)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("encode_ply", num_points), &standard, |b, s| {
            b.iter(|| encode_ply(black_box(s), &CANONICAL_ORDER).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
