//! Kruskal最小生成树
//!
//! 边按权重稳定排序（同权保持输入顺序），用并查集判断是否成环。
//! 图不连通时得到生成森林。

use log::{debug, trace};
use std::sync::Arc;

use crate::core::{Edge, Graph, Trace, TraceRecorder};
use crate::services::algorithm::types::{MstAction, MstAuxiliary, MstStep};
use crate::services::algorithm::union_find::UnionFind;

/// Kruskal算法结构体
pub struct Kruskal;

struct KruskalState {
    sorted_edges: Arc<[Edge]>,
    sets: UnionFind,
    mst_edges: Vec<Edge>,
    total_weight: i64,
}

impl KruskalState {
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
            auxiliary: MstAuxiliary::Kruskal {
                parent: self.sets.parent().to_vec(),
                sorted_edges: Arc::clone(&self.sorted_edges),
            },
        }
    }
}

impl Kruskal {
    /// 生成Kruskal的完整轨迹
    pub fn run(graph: &Graph) -> Trace<MstStep> {
        let n = graph.vertex_count();
        let target = n.saturating_sub(1);

        let mut sorted = graph.edges().to_vec();
        sorted.sort_by_key(|edge| edge.weight);

        let mut recorder = TraceRecorder::new();
        let mut state = KruskalState {
            sorted_edges: Arc::from(sorted),
            sets: UnionFind::new(n),
            mst_edges: Vec::new(),
            total_weight: 0,
        };

        recorder.record(|index| {
            state.snapshot(
                index,
                MstAction::SortEdges,
                format!("Sort {} edges by weight", state.sorted_edges.len()),
                None,
            )
        });

        let sorted_edges = Arc::clone(&state.sorted_edges);
        for edge in sorted_edges.iter() {
            if state.mst_edges.len() >= target {
                break;
            }

            recorder.record(|index| {
                state.snapshot(
                    index,
                    MstAction::Examine,
                    format!(
                        "Examine edge {} - {} (weight {})",
                        edge.from, edge.to, edge.weight
                    ),
                    Some(*edge),
                )
            });

            if state.sets.union(edge.from, edge.to) {
                trace!("Kruskal accepted {:?}", edge);
                state.mst_edges.push(*edge);
                state.total_weight += edge.weight;
                recorder.record(|index| {
                    state.snapshot(
                        index,
                        MstAction::Accept,
                        format!(
                            "Accept edge {} - {}: it joins two components (total weight {})",
                            edge.from, edge.to, state.total_weight
                        ),
                        Some(*edge),
                    )
                });
            } else {
                recorder.record(|index| {
                    state.snapshot(
                        index,
                        MstAction::Reject,
                        format!(
                            "Reject edge {} - {}: it would form a cycle",
                            edge.from, edge.to
                        ),
                        Some(*edge),
                    )
                });
            }
        }

        recorder.record(|index| {
            state.snapshot(
                index,
                MstAction::Complete,
                format!(
                    "Kruskal complete: {} edges, total weight {}",
                    state.mst_edges.len(),
                    state.total_weight
                ),
                None,
            )
        });

        debug!(
            "Kruskal on {} vertices produced {} steps, total weight {}",
            n,
            recorder.len(),
            state.total_weight
        );
        recorder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        Graph::from_triples(
            4,
            &[(0, 1, 10), (0, 2, 6), (0, 3, 5), (1, 3, 15), (2, 3, 4)],
        )
        .expect("Graph should be valid in test")
    }

    #[test]
    fn test_total_weight() {
        let trace = Kruskal::run(&sample_graph());
        let last = trace.last().expect("Trace should not be empty in test");

        assert_eq!(last.action, MstAction::Complete);
        assert_eq!(last.total_weight, 19);
        assert_eq!(
            last.mst_edges,
            vec![Edge::new(2, 3, 4), Edge::new(0, 3, 5), Edge::new(0, 1, 10)]
        );
    }

    #[test]
    fn test_rejects_cycle_edge_and_stops_early() {
        let trace = Kruskal::run(&sample_graph());
        let actions: Vec<MstAction> = trace.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                MstAction::SortEdges,
                MstAction::Examine,
                MstAction::Accept,
                MstAction::Examine,
                MstAction::Accept,
                MstAction::Examine,
                MstAction::Reject,
                MstAction::Examine,
                MstAction::Accept,
                MstAction::Complete,
            ]
        );
        // 边 1-3（15）从未被检查
        assert!(trace
            .iter()
            .all(|s| s.current_edge != Some(Edge::new(1, 3, 15))));
    }

    #[test]
    fn test_stable_sort_keeps_input_order_for_ties() {
        let graph = Graph::from_triples(3, &[(1, 2, 1), (0, 1, 1), (0, 2, 1)])
            .expect("Graph should be valid in test");
        let trace = Kruskal::run(&graph);
        match &trace[0].auxiliary {
            MstAuxiliary::Kruskal { sorted_edges, .. } => {
                assert_eq!(sorted_edges[0], Edge::new(1, 2, 1));
                assert_eq!(sorted_edges[1], Edge::new(0, 1, 1));
                assert_eq!(sorted_edges[2], Edge::new(0, 2, 1));
            }
            other => panic!("unexpected auxiliary state: {:?}", other),
        }
    }

    #[test]
    fn test_parent_snapshot_changes_after_union() {
        let trace = Kruskal::run(&sample_graph());
        let parents: Vec<Vec<usize>> = trace
            .iter()
            .map(|s| match &s.auxiliary {
                MstAuxiliary::Kruskal { parent, .. } => parent.clone(),
                MstAuxiliary::Prim { .. } => Vec::new(),
            })
            .collect();
        assert_eq!(parents[0], vec![0, 1, 2, 3]);
        assert_ne!(parents[2], vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_disconnected_graph_yields_forest() {
        let graph = Graph::from_triples(4, &[(0, 1, 3), (2, 3, 1)])
            .expect("Graph should be valid in test");
        let trace = Kruskal::run(&graph);
        let last = trace.last().expect("Trace should not be empty in test");
        assert_eq!(last.mst_edges.len(), 2);
        assert_eq!(last.total_weight, 4);
    }

    #[test]
    fn test_single_vertex() {
        let graph = Graph::new(1, vec![]).expect("Graph should be valid in test");
        let trace = Kruskal::run(&graph);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[1].total_weight, 0);
    }
}
