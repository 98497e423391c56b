use criterion::{black_box, criterion_group, criterion_main, Criterion};
use transitive_size::{generate, IndexedGraph, OffsetGraph};

fn bench_encoders(c: &mut Criterion) {
    let graph = generate(1_500, 15_000, 0x5EED);

    c.bench_function("encode_indexed", |b| {
        b.iter(|| black_box(IndexedGraph::encode(black_box(&graph)).unwrap()));
    });

    c.bench_function("encode_offset_usize", |b| {
        b.iter(|| black_box(OffsetGraph::<usize>::encode(black_box(&graph)).unwrap()));
    });

    c.bench_function("encode_offset_u32", |b| {
        b.iter(|| black_box(OffsetGraph::<u32>::encode(black_box(&graph)).unwrap()));
    });

    let wide = OffsetGraph::<usize>::encode(&graph).unwrap();
    c.bench_function("narrow_offset_usize_to_u16", |b| {
        b.iter(|| black_box(wide.to_width::<u16>().unwrap()));
    });
}

criterion_group!(benches, bench_encoders);
criterion_main!(benches);
