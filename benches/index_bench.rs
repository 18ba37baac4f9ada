use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use labeled_digraph::prelude::*;

const LABELS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

fn build_random_graph(nodes: usize, avg_degree: usize, seed: u64) -> (Graph<&'static str>, Vec<NodeId>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut g = Graph::new();
    let ids: Vec<NodeId> = (0..nodes)
        .map(|i| g.create_node(Some(LABELS[i % LABELS.len()]), ()))
        .collect();
    g.add_node(ids[0]);
    for i in 1..nodes {
        // spanning edge keeps everything reachable from the seed
        let parent = ids[rng.gen_range(0..i)];
        g.new_edge(parent, ids[i], Some(LABELS[rng.gen_range(0..LABELS.len())]), ());
    }
    for _ in 0..nodes * avg_degree.saturating_sub(1) {
        let from = ids[rng.gen_range(0..nodes)];
        let to = ids[rng.gen_range(0..nodes)];
        g.new_edge(from, to, Some(LABELS[rng.gen_range(0..LABELS.len())]), ());
    }
    (g, ids)
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");

    for &nodes in &[1_000usize, 10_000] {
        let (g, _) = build_random_graph(nodes, 4, 42);

        group.bench_with_input(BenchmarkId::new("nodes_traversal", nodes), &nodes, |b, _| {
            b.iter(|| black_box(g.nodes().count()));
        });

        group.bench_with_input(BenchmarkId::new("incoming_build", nodes), &nodes, |b, _| {
            b.iter(|| {
                let idx = g.index();
                let total: usize = idx.node_ids().iter().map(|&n| idx.in_degree(n)).sum();
                black_box(total);
            });
        });

        group.bench_with_input(BenchmarkId::new("sinks_sources", nodes), &nodes, |b, _| {
            b.iter(|| {
                let idx = g.index();
                black_box((idx.sinks(true).len(), idx.sources(true).len()));
            });
        });
    }

    group.finish();
}

fn bench_edge_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_store");

    for &degree in &[8usize, 64, 512] {
        let mut g: Graph<&str> = Graph::new();
        let hub = g.new_node(None, ());
        let leaf = g.create_node(None, ());
        for i in 0..degree {
            g.new_edge(hub, leaf, Some(LABELS[i % LABELS.len()]), ());
        }

        group.bench_with_input(BenchmarkId::new("out_edges_with", degree), &degree, |b, _| {
            let node = g.node(hub).unwrap();
            b.iter(|| black_box(node.out_edges_with(Some(&"c")).count()));
        });
    }

    group.finish();
}

fn bench_remove_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_node");

    // per-node cost should stay flat as the graph grows
    for &nodes in &[5_000usize, 20_000] {
        group.bench_with_input(BenchmarkId::new("seeded_same_label", nodes), &nodes, |b, &n| {
            b.iter_batched(
                || {
                    let mut g: Graph<&str> = Graph::new();
                    let ids: Vec<NodeId> = (0..n).map(|_| g.new_node(Some("same"), ())).collect();
                    let hub = g.new_node(None, ());
                    for &id in &ids {
                        g.new_edge(id, hub, None, ());
                    }
                    (g, ids)
                },
                |(mut g, ids)| {
                    for id in ids {
                        g.remove_node(id);
                    }
                    black_box(g.node_count())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index, bench_edge_lookup, bench_remove_node);
criterion_main!(benches);
