//! Dijkstra算法模块
//!
//! 在对称（无向）邻接视图上计算单源最短路径，并记录每一次选点、标记和松弛。
//! 选点使用线性扫描而不是二叉堆：距离相同时取编号最小的顶点，
//! 这个平局规则决定了轨迹的步骤顺序。

use log::debug;

use crate::core::{Distance, Edge, Graph, Trace, TraceRecorder};
use crate::services::algorithm::types::{ShortestPathAction, ShortestPathStep};

/// Dijkstra算法结构体
pub struct Dijkstra;

/// 记录过程中随步骤一起拷贝的可变状态
struct DijkstraState {
    distances: Vec<Distance>,
    previous: Vec<Option<usize>>,
    visited: Vec<bool>,
}

impl DijkstraState {
    fn snapshot(
        &self,
        index: usize,
        action: ShortestPathAction,
        description: String,
        current_vertex: Option<usize>,
        current_edge: Option<Edge>,
    ) -> ShortestPathStep {
        ShortestPathStep {
            index,
            description,
            action,
            distances: self.distances.clone(),
            previous: self.previous.clone(),
            current_vertex,
            current_edge,
            visited: Some(self.visited.clone()),
            iteration: None,
            relaxation_count: None,
            has_negative_cycle: None,
        }
    }

    /// 未访问顶点中距离最小者，平局取编号最小
    fn closest_unvisited(&self) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (vertex, distance) in self.distances.iter().enumerate() {
            if self.visited[vertex] {
                continue;
            }
            if let Distance::Finite(value) = distance {
                match best {
                    Some((_, best_value)) if best_value <= *value => {}
                    _ => best = Some((vertex, *value)),
                }
            }
        }
        best.map(|(vertex, _)| vertex)
    }
}

impl Dijkstra {
    /// 生成从 `source` 出发的完整轨迹
    ///
    /// 调用方保证边权非负且 `source` 在图内；源点越界时返回空轨迹。
    pub fn run(graph: &Graph, source: usize) -> Trace<ShortestPathStep> {
        if !graph.contains_vertex(source) {
            return Trace::empty();
        }

        let n = graph.vertex_count();
        let adjacency = graph.undirected_adjacency();
        let mut recorder = TraceRecorder::new();
        let mut state = DijkstraState {
            distances: vec![Distance::Infinite; n],
            previous: vec![None; n],
            visited: vec![false; n],
        };
        state.distances[source] = Distance::Finite(0);

        for _ in 0..n {
            let Some(u) = state.closest_unvisited() else {
                break;
            };
            let dist_u = state.distances[u];

            recorder.record(|index| {
                state.snapshot(
                    index,
                    ShortestPathAction::SelectVertex,
                    format!("Select vertex {} with smallest tentative distance {}", u, dist_u),
                    Some(u),
                    None,
                )
            });

            state.visited[u] = true;
            recorder.record(|index| {
                state.snapshot(
                    index,
                    ShortestPathAction::VisitVertex,
                    format!("Mark vertex {} as visited", u),
                    Some(u),
                    None,
                )
            });

            for neighbor in &adjacency[u] {
                let v = neighbor.vertex;
                if state.visited[v] {
                    continue;
                }

                let candidate = dist_u.extend(neighbor.weight);
                if candidate < state.distances[v] {
                    let old = state.distances[v];
                    state.distances[v] = candidate;
                    state.previous[v] = Some(u);
                    recorder.record(|index| {
                        state.snapshot(
                            index,
                            ShortestPathAction::Relax,
                            format!(
                                "Relax edge {} -> {} (weight {}): distance of {} improves from {} to {}",
                                u, v, neighbor.weight, v, old, candidate
                            ),
                            Some(u),
                            Some(Edge::new(u, v, neighbor.weight)),
                        )
                    });
                }
            }
        }

        recorder.record(|index| {
            state.snapshot(
                index,
                ShortestPathAction::Complete,
                "Dijkstra complete: all reachable vertices have final distances".to_string(),
                None,
                None,
            )
        });

        debug!(
            "Dijkstra from {} on {} vertices produced {} steps",
            source,
            n,
            recorder.len()
        );
        recorder.finish()
    }

    /// 只要最终距离时的便捷入口
    pub fn shortest_distances(graph: &Graph, source: usize) -> Vec<Distance> {
        Self::run(graph, source)
            .last()
            .map(|step| step.distances.clone())
            .unwrap_or_default()
    }
}
