use algotrace::core::{Edge, Graph};
use algotrace::services::algorithm::{
    Dijkstra, FloydWarshall, Huffman, Kmp, Kruskal, NaiveMatcher, Prim, RabinKarp,
    RabinKarpParams,
};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_graph(rng: &mut StdRng, vertex_count: usize) -> Graph {
    let mut edges = Vec::new();
    for vertex in 1..vertex_count {
        edges.push(Edge::new(rng.gen_range(0..vertex), vertex, rng.gen_range(1..50)));
    }
    for from in 0..vertex_count {
        for to in (from + 2)..vertex_count {
            if rng.gen_bool(0.1) {
                edges.push(Edge::new(from, to, rng.gen_range(1..50)));
            }
        }
    }
    Graph::new(vertex_count, edges).unwrap()
}

fn random_text(rng: &mut StdRng, len: usize) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn bench_graph_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_traces");
    for &n in &[16usize, 64] {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = random_graph(&mut rng, n);

        group.bench_function(format!("dijkstra_{n}"), |b| {
            b.iter(|| black_box(Dijkstra::run(&graph, 0).len()))
        });
        group.bench_function(format!("floyd_warshall_{n}"), |b| {
            b.iter(|| black_box(FloydWarshall::run(&graph).len()))
        });
        group.bench_function(format!("kruskal_{n}"), |b| {
            b.iter(|| black_box(Kruskal::run(&graph).len()))
        });
        group.bench_function(format!("prim_{n}"), |b| {
            b.iter(|| black_box(Prim::run(&graph, 0).len()))
        });
    }
    group.finish();
}

fn bench_string_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_traces");
    let params = RabinKarpParams::default();
    for &len in &[1_000usize, 5_000] {
        group.bench_function(format!("matchers_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    (random_text(&mut rng, len), random_text(&mut rng, 6))
                },
                |(text, pattern)| {
                    black_box(NaiveMatcher::run(&text, &pattern).len());
                    black_box(Kmp::run(&text, &pattern).len());
                    black_box(RabinKarp::run(&text, &pattern, params).len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("huffman_{len}"), |b| {
            let mut rng = StdRng::seed_from_u64(11);
            let text = random_text(&mut rng, len);
            b.iter(|| black_box(Huffman::run(&text).compressed_bits()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_graph_engines, bench_string_engines);
criterion_main!(benches);
