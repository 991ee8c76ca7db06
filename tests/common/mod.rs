//! 集成测试共享工具模块
//!
//! 用固定种子的随机数生成图和字符串，保证每次运行的输入相同

#![allow(dead_code)]

use algotrace::core::{Edge, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const SEED: u64 = 0x5EED_A160;

pub fn rng(offset: u64) -> StdRng {
    StdRng::seed_from_u64(SEED + offset)
}

/// 连通无向图：先随机生成一棵生成树，再补充额外的边
///
/// 同一对顶点之间最多一条边。
pub fn connected_graph(rng: &mut StdRng, vertex_count: usize, extra_edges: usize, max_weight: i64) -> Graph {
    let mut pairs = HashSet::new();
    let mut edges = Vec::new();

    for vertex in 1..vertex_count {
        let parent = rng.gen_range(0..vertex);
        pairs.insert((parent, vertex));
        edges.push(Edge::new(parent, vertex, rng.gen_range(0..=max_weight)));
    }

    for _ in 0..extra_edges {
        let a = rng.gen_range(0..vertex_count);
        let b = rng.gen_range(0..vertex_count);
        let pair = (a.min(b), a.max(b));
        if a == b || !pairs.insert(pair) {
            continue;
        }
        edges.push(Edge::new(a, b, rng.gen_range(0..=max_weight)));
    }

    Graph::new(vertex_count, edges).expect("Generated graph should be valid in test")
}

/// 同一张无向图的有向版本：每条边拆成两个方向
pub fn symmetric_directed(graph: &Graph) -> Graph {
    let edges = graph
        .edges()
        .iter()
        .flat_map(|e| [Edge::new(e.from, e.to, e.weight), Edge::new(e.to, e.from, e.weight)])
        .collect();
    Graph::new(graph.vertex_count(), edges).expect("Directed graph should be valid in test")
}

/// 带负权的有向无环图：边只从小编号指向大编号，因此不存在环
pub fn signed_dag(rng: &mut StdRng, vertex_count: usize, edge_chance: f64) -> Graph {
    let mut edges = Vec::new();
    for from in 0..vertex_count {
        for to in (from + 1)..vertex_count {
            if rng.gen_bool(edge_chance) {
                edges.push(Edge::new(from, to, rng.gen_range(-10..=20)));
            }
        }
    }
    Graph::new(vertex_count, edges).expect("Generated DAG should be valid in test")
}

pub fn random_text(rng: &mut StdRng, alphabet: &[char], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// 朴素的参考实现，直接比较每个窗口
pub fn reference_matches(text: &str, pattern: &str) -> Vec<usize> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&start| text[start..start + pattern.len()] == pattern[..])
        .collect()
}

/// 六个顶点的示例图
pub fn sample_graph() -> Graph {
    Graph::from_triples(
        6,
        &[
            (0, 1, 4),
            (0, 2, 2),
            (1, 2, 1),
            (1, 3, 5),
            (2, 3, 8),
            (2, 4, 10),
            (3, 4, 2),
            (3, 5, 6),
            (4, 5, 3),
        ],
    )
    .expect("Sample graph should be valid in test")
}
