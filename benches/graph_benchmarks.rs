use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mailgraph::prelude::*;

/// Deterministic hub-and-spoke graph with cross-chords, shaped like the
/// mixed traffic the engine targets (hundreds to low thousands of nodes).
fn create_test_graph(nodes: usize, chords_per_node: usize) -> MailGraph {
    let mut graph = MailGraph::new();
    let hubs = (nodes / 50).max(1);

    for i in 0..nodes {
        let id = format!("user{i}@bench.test");
        let hub = format!("hub{}@bench.test", i % hubs);
        let weight = (i % 9 + 1) as u64;
        graph.add_edge(&hub, &id, weight, None).unwrap();

        for c in 1..=chords_per_node {
            let peer = format!("user{}@bench.test", (i + c * 7) % nodes);
            graph.add_edge(&id, &peer, ((i + c) % 4 + 1) as u64, None).unwrap();
        }
    }
    graph
}

fn benchmark_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for &size in &[100, 500, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("add_edge", size), &size, |b, &size| {
            b.iter(|| black_box(create_test_graph(size, 3)));
        });
    }

    group.finish();
}

fn benchmark_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for &size in &[100, 500, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("dijkstra", size), &size, |b, &size| {
            let graph = create_test_graph(size, 3);
            let target = format!("user{}@bench.test", size - 1);
            b.iter(|| {
                black_box(
                    ShortestPath
                        .shortest_path(&graph, "hub0@bench.test", &target)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn benchmark_spanning_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("spanning_forest");

    for &size in &[100, 500, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("kruskal", size), &size, |b, &size| {
            let graph = create_test_graph(size, 3);
            b.iter(|| black_box(MinimumSpanningForest.compute(&graph).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("centrality");

    for &size in &[100, 250, 500] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("betweenness", size), &size, |b, &size| {
            let graph = create_test_graph(size, 2);
            b.iter(|| black_box(BetweennessCentrality.compute(&graph).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("closeness", size), &size, |b, &size| {
            let graph = create_test_graph(size, 2);
            b.iter(|| black_box(ClosenessCentrality.compute(&graph).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_detection_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection_pipeline");

    for &size in &[100, 500, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("score_and_rank", size), &size, |b, &size| {
            let graph = create_test_graph(size, 2);
            let pipeline = DetectionPipeline::new(DetectionConfig::default()).unwrap();
            b.iter(|| black_box(pipeline.run(&graph).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_graph_build,
    benchmark_shortest_path,
    benchmark_spanning_forest,
    benchmark_centrality,
    benchmark_detection_pipeline
);
criterion_main!(benches);
