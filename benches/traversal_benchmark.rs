use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use transitive_size::{generate, EngineKind};

fn bench_engines(c: &mut Criterion) {
    // Same shape as the CLI default: ~10 edges per node, O(N) full traversals.
    for &(nodes, edges) in &[(500usize, 5_000usize), (1_500, 15_000)] {
        let graph = generate(nodes, edges, 0x5EED);
        let mut group = c.benchmark_group(format!("transitive_{nodes}n_{edges}e"));
        group.throughput(Throughput::Elements(nodes as u64));
        group.sample_size(10);

        for kind in EngineKind::ALL {
            let mut engine = kind.build(&graph).expect("generated graphs are well-formed");
            group.bench_function(BenchmarkId::from_parameter(kind), |b| {
                b.iter(|| {
                    engine.prepare();
                    engine.run();
                });
            });
            black_box(engine.finalize());
        }
        group.finish();
    }
}

fn bench_deep_chain(c: &mut Criterion) {
    // A single long path: worst case for the recursive engine's call stack.
    let len = 5_000;
    let mut graph = transitive_size::Graph::with_capacity(len);
    for i in 0..len {
        let children: Vec<String> = if i + 1 < len { vec![format!("n{}", i + 1)] } else { Vec::new() };
        graph.insert(format!("n{i}"), transitive_size::Node::new(1, children));
    }

    let mut group = c.benchmark_group("deep_chain");
    group.sample_size(10);
    for kind in [EngineKind::Recursive, EngineKind::Iterative, EngineKind::OffsetBitset] {
        let mut engine = kind.build(&graph).expect("chain is well-formed");
        group.bench_function(BenchmarkId::from_parameter(kind), |b| {
            b.iter(|| {
                engine.prepare();
                engine.run();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines, bench_deep_chain);
criterion_main!(benches);
