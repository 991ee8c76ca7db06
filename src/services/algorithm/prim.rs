//! Prim最小生成树
//!
//! 每一轮重新计算割边集合（恰有一个端点已访问的边），按权重稳定排序后取最小者。
//! 割边的发现顺序是：已访问顶点按编号升序，每个顶点的关联边按存储顺序。

use log::debug;

use crate::core::{Edge, Graph, Neighbor, Trace, TraceRecorder};
use crate::services::algorithm::types::{MstAction, MstAuxiliary, MstStep};

/// Prim算法结构体
pub struct Prim;

struct PrimState {
    visited: Vec<bool>,
    frontier: Vec<Edge>,
    mst_edges: Vec<Edge>,
    total_weight: i64,
}

impl PrimState {
    fn snapshot(
        &self,
        index: usize,
        action: MstAction,
        description: String,
        current_edge: Option<Edge>,
    ) -> MstStep {
        MstStep {
            index,
            description,
            action,
            mst_edges: self.mst_edges.clone(),
            total_weight: self.total_weight,
            current_edge,
            auxiliary: MstAuxiliary::Prim {
                visited: self.visited.clone(),
                frontier: self.frontier.clone(),
            },
        }
    }

    /// 重新计算并排序割边，边的方向统一为 已访问 -> 未访问
    fn compute_frontier(&mut self, adjacency: &[Vec<Neighbor>]) {
        let mut frontier = Vec::new();
        for (u, neighbors) in adjacency.iter().enumerate() {
            if !self.visited[u] {
                continue;
            }
            for neighbor in neighbors {
                if !self.visited[neighbor.vertex] {
                    frontier.push(Edge::new(u, neighbor.vertex, neighbor.weight));
                }
            }
        }
        frontier.sort_by_key(|edge| edge.weight);
        self.frontier = frontier;
    }
}

impl Prim {
    /// 从 `start` 开始生成Prim的完整轨迹；起点越界时返回空轨迹
    pub fn run(graph: &Graph, start: usize) -> Trace<MstStep> {
        if !graph.contains_vertex(start) {
            return Trace::empty();
        }

        let n = graph.vertex_count();
        let target = n - 1;
        let adjacency = graph.undirected_adjacency();
        let mut recorder = TraceRecorder::new();
        let mut state = PrimState {
            visited: vec![false; n],
            frontier: Vec::new(),
            mst_edges: Vec::new(),
            total_weight: 0,
        };
        state.visited[start] = true;

        recorder.record(|index| {
            state.snapshot(
                index,
                MstAction::Start,
                format!("Start the tree at vertex {}", start),
                None,
            )
        });

        while state.mst_edges.len() < target {
            state.compute_frontier(&adjacency);

            let Some(chosen) = state.frontier.first().copied() else {
                recorder.record(|index| {
                    state.snapshot(
                        index,
                        MstAction::FrontierEmpty,
                        "No edge leaves the tree: the graph is disconnected".to_string(),
                        None,
                    )
                });
                break;
            };

            recorder.record(|index| {
                state.snapshot(
                    index,
                    MstAction::SelectEdge,
                    format!(
                        "Select the lightest frontier edge {} - {} (weight {}) out of {} candidates",
                        chosen.from,
                        chosen.to,
                        chosen.weight,
                        state.frontier.len()
                    ),
                    Some(chosen),
                )
            });

            state.visited[chosen.to] = true;
            state.mst_edges.push(chosen);
            state.total_weight += chosen.weight;
            recorder.record(|index| {
                state.snapshot(
                    index,
                    MstAction::AddEdge,
                    format!(
                        "Add edge {} - {} and vertex {} to the tree (total weight {})",
                        chosen.from, chosen.to, chosen.to, state.total_weight
                    ),
                    Some(chosen),
                )
            });
        }

        recorder.record(|index| {
            state.snapshot(
                index,
                MstAction::Complete,
                format!(
                    "Prim complete: {} edges, total weight {}",
                    state.mst_edges.len(),
                    state.total_weight
                ),
                None,
            )
        });

        debug!(
            "Prim from {} produced {} steps, total weight {}",
            start,
            recorder.len(),
            state.total_weight
        );
        recorder.finish()
    }
}
