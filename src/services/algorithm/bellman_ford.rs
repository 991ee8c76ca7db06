//! Bellman-Ford算法模块
//!
//! 有向图上的单源最短路径，支持负权边，可检测负权环。
//! 每一轮都按输入边列表的顺序松弛，不做排序。

use log::{debug, trace};

use crate::core::{Distance, Edge, Graph, Trace, TraceRecorder};
use crate::services::algorithm::types::{ShortestPathAction, ShortestPathStep};

/// Bellman-Ford算法结构体
pub struct BellmanFord;

/// Bellman-Ford算法结果
#[derive(Debug, Clone)]
pub struct BellmanFordResult {
    /// 从起点到各节点的最短距离
    pub distances: Vec<Distance>,
    /// 前驱节点，用于重建路径
    pub predecessors: Vec<Option<usize>>,
    /// 是否存在负权环
    pub has_negative_cycle: bool,
}

struct BellmanFordState {
    distances: Vec<Distance>,
    previous: Vec<Option<usize>>,
    relaxation_count: usize,
}

impl BellmanFordState {
    fn snapshot(
        &self,
        index: usize,
        action: ShortestPathAction,
        description: String,
        iteration: Option<usize>,
        current_edge: Option<Edge>,
        has_negative_cycle: bool,
    ) -> ShortestPathStep {
        ShortestPathStep {
            index,
            description,
            action,
            distances: self.distances.clone(),
            previous: self.previous.clone(),
            current_vertex: current_edge.map(|edge| edge.to),
            current_edge,
            visited: None,
            iteration,
            relaxation_count: Some(self.relaxation_count),
            has_negative_cycle: Some(has_negative_cycle),
        }
    }

    /// 沿 `edge` 松弛能得到的新距离，不能改进时为 `None`
    fn improvement(&self, edge: &Edge) -> Option<Distance> {
        let from = self.distances[edge.from];
        if !from.is_finite() {
            return None;
        }
        let candidate = from.extend(edge.weight);
        (candidate < self.distances[edge.to]).then_some(candidate)
    }
}

impl BellmanFord {
    /// 执行Bellman-Ford算法并生成轨迹
    ///
    /// 负权环不是错误：轨迹以 `has_negative_cycle = Some(true)` 的步骤结束。
    pub fn run(graph: &Graph, source: usize) -> Trace<ShortestPathStep> {
        if !graph.contains_vertex(source) {
            return Trace::empty();
        }

        let n = graph.vertex_count();
        let mut recorder = TraceRecorder::new();
        let mut state = BellmanFordState {
            distances: vec![Distance::Infinite; n],
            previous: vec![None; n],
            relaxation_count: 0,
        };
        state.distances[source] = Distance::Finite(0);

        // 松弛操作，最多 n-1 轮
        for iteration in 1..n {
            recorder.record(|index| {
                state.snapshot(
                    index,
                    ShortestPathAction::IterationStart,
                    format!("Start iteration {} of {}", iteration, n - 1),
                    Some(iteration),
                    None,
                    false,
                )
            });

            let mut updated = false;
            for edge in graph.edges() {
                let Some(candidate) = state.improvement(edge) else {
                    continue;
                };
                let old = state.distances[edge.to];
                state.distances[edge.to] = candidate;
                state.previous[edge.to] = Some(edge.from);
                state.relaxation_count += 1;
                updated = true;

                trace!("Bellman-Ford relaxed {:?} in iteration {}", edge, iteration);
                recorder.record(|index| {
                    state.snapshot(
                        index,
                        ShortestPathAction::Relax,
                        format!(
                            "Relax edge {} -> {} (weight {}): distance of {} improves from {} to {}",
                            edge.from, edge.to, edge.weight, edge.to, old, candidate
                        ),
                        Some(iteration),
                        Some(*edge),
                        false,
                    )
                });
            }

            // 如果没有更新，提前终止
            if !updated {
                recorder.record(|index| {
                    state.snapshot(
                        index,
                        ShortestPathAction::EarlyTermination,
                        format!(
                            "No relaxation in iteration {}; distances are final",
                            iteration
                        ),
                        Some(iteration),
                        None,
                        false,
                    )
                });
                break;
            }
        }

        // 检测负权环：再做一整轮，只要还有边可以松弛就存在负权环
        let relaxable = graph
            .edges()
            .iter()
            .find(|edge| state.improvement(edge).is_some());

        match relaxable {
            Some(edge) => {
                recorder.record(|index| {
                    state.snapshot(
                        index,
                        ShortestPathAction::NegativeCycleDetected,
                        format!(
                            "Edge {} -> {} (weight {}) can still be relaxed: negative cycle detected",
                            edge.from, edge.to, edge.weight
                        ),
                        None,
                        Some(*edge),
                        true,
                    )
                });
            }
            None => {
                recorder.record(|index| {
                    state.snapshot(
                        index,
                        ShortestPathAction::NoNegativeCycle,
                        "No edge can be relaxed further: no negative cycle".to_string(),
                        None,
                        None,
                        false,
                    )
                });
            }
        }

        debug!(
            "Bellman-Ford from {} produced {} steps after {} relaxations",
            source,
            recorder.len(),
            state.relaxation_count
        );
        recorder.finish()
    }

    /// 只取最终结果
    pub fn shortest_paths(graph: &Graph, source: usize) -> BellmanFordResult {
        let trace = Self::run(graph, source);
        match trace.last() {
            Some(step) => BellmanFordResult {
                distances: step.distances.clone(),
                predecessors: step.previous.clone(),
                has_negative_cycle: step.has_negative_cycle.unwrap_or(false),
            },
            None => BellmanFordResult {
                distances: Vec::new(),
                predecessors: Vec::new(),
                has_negative_cycle: false,
            },
        }
    }
}
