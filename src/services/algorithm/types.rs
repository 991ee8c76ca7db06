//! 算法轨迹的步骤类型
//!
//! 每个步骤都持有自己的状态拷贝（距离数组、前驱数组、访问标记……），
//! 回放时逐个读取即可，不依赖任何仍在变化的状态。

use serde::Serialize;
use std::sync::Arc;

use crate::core::{Distance, Edge, TraceStep};

macro_rules! impl_trace_step {
    ($($step:ty),* $(,)?) => {
        $(
            impl TraceStep for $step {
                fn index(&self) -> usize {
                    self.index
                }

                fn description(&self) -> &str {
                    &self.description
                }
            }
        )*
    };
}

impl_trace_step!(ShortestPathStep, AllPairsStep, MstStep, MatchStep);

/// 单源最短路径步骤的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortestPathAction {
    SelectVertex,
    VisitVertex,
    Relax,
    IterationStart,
    EarlyTermination,
    NegativeCycleDetected,
    NoNegativeCycle,
    Complete,
}

/// Dijkstra 与 Bellman-Ford 的步骤快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPathStep {
    pub index: usize,
    pub description: String,
    pub action: ShortestPathAction,
    pub distances: Vec<Distance>,
    pub previous: Vec<Option<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_vertex: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_edge: Option<Edge>,
    /// 仅 Dijkstra
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited: Option<Vec<bool>>,
    /// 以下仅 Bellman-Ford
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relaxation_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_negative_cycle: Option<bool>,
}

impl ShortestPathStep {
    /// 沿前驱数组重建从源点到 `target` 的路径
    ///
    /// 不可达或前驱链成环（负权环）时返回 `None`。
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.distances.get(target)?.is_finite() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(predecessor) = self.previous[current] {
            if path.contains(&predecessor) {
                return None;
            }
            path.push(predecessor);
            current = predecessor;
        }

        path.reverse();
        Some(path)
    }

    /// 所有有限距离
    pub fn finite_distances(&self) -> Vec<Option<i64>> {
        self.distances.iter().map(Distance::finite).collect()
    }
}

/// Floyd-Warshall 步骤的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllPairsAction {
    Intermediate,
    Update,
    Complete,
}

/// Floyd-Warshall 的步骤快照：完整距离矩阵与下一跳矩阵
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllPairsStep {
    pub index: usize,
    pub description: String,
    pub action: AllPairsAction,
    pub distances: Vec<Vec<Distance>>,
    pub next: Vec<Vec<Option<usize>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_negative_cycle: Option<bool>,
}

impl AllPairsStep {
    pub fn distance(&self, from: usize, to: usize) -> Option<Distance> {
        self.distances.get(from)?.get(to).copied()
    }

    /// 沿下一跳矩阵重建 `from -> to` 的路径
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        if from == to {
            return self.distances.get(from).map(|_| vec![from]);
        }

        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = (*self.next.get(current)?.get(to)?)?;
            if path.len() > self.next.len() {
                return None;
            }
            path.push(current);
        }
        Some(path)
    }
}

/// 最小生成树步骤的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MstAction {
    SortEdges,
    Examine,
    Accept,
    Reject,
    Start,
    SelectEdge,
    AddEdge,
    FrontierEmpty,
    Complete,
}

/// 引擎特有的辅助状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum MstAuxiliary {
    Kruskal {
        parent: Vec<usize>,
        sorted_edges: Arc<[Edge]>,
    },
    Prim {
        visited: Vec<bool>,
        frontier: Vec<Edge>,
    },
}

/// Kruskal 与 Prim 的步骤快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MstStep {
    pub index: usize,
    pub description: String,
    pub action: MstAction,
    pub mst_edges: Vec<Edge>,
    pub total_weight: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_edge: Option<Edge>,
    pub auxiliary: MstAuxiliary,
}

/// 字符串匹配步骤的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    WindowShift,
    CharMatch,
    CharMismatch,
    WindowMatched,
    WindowAborted,
    FailureFunction,
    FallBack,
    FullMatch,
    InitialHashes,
    RollingHash,
    HashMatch,
    ExactMatch,
    HashCollision,
    Complete,
}

/// Rabin-Karp 的滚动哈希状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollingHashState {
    pub pattern_hash: u64,
    pub window_hash: u64,
    pub hash_power: u64,
    /// 到目前为止每个窗口的哈希值，下标即窗口起点
    pub window_hashes: Vec<u64>,
}

/// Naive、KMP、Rabin-Karp 的步骤快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStep {
    pub index: usize,
    pub description: String,
    pub action: MatchAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start: Option<usize>,
    pub is_match: bool,
    pub comparisons: usize,
    pub matches: Vec<usize>,
    /// KMP 的失效函数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lps: Option<Arc<[usize]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<RollingHashState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_source_step(distances: Vec<Distance>, previous: Vec<Option<usize>>) -> ShortestPathStep {
        ShortestPathStep {
            index: 1,
            description: "test".to_string(),
            action: ShortestPathAction::Complete,
            distances,
            previous,
            current_vertex: None,
            current_edge: None,
            visited: None,
            iteration: None,
            relaxation_count: None,
            has_negative_cycle: None,
        }
    }

    #[test]
    fn test_path_to_follows_previous() {
        let step = single_source_step(
            vec![Distance::Finite(0), Distance::Finite(2), Distance::Finite(5)],
            vec![None, Some(0), Some(1)],
        );
        assert_eq!(step.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(step.path_to(0), Some(vec![0]));
    }

    #[test]
    fn test_path_to_unreachable() {
        let step = single_source_step(
            vec![Distance::Finite(0), Distance::Infinite],
            vec![None, None],
        );
        assert_eq!(step.path_to(1), None);
        assert_eq!(step.path_to(9), None);
    }

    #[test]
    fn test_path_to_detects_predecessor_cycle() {
        let step = single_source_step(
            vec![Distance::Finite(0), Distance::Finite(-3), Distance::Finite(-2)],
            vec![Some(2), Some(2), Some(1)],
        );
        assert_eq!(step.path_to(1), None);
    }

    #[test]
    fn test_all_pairs_path() {
        let step = AllPairsStep {
            index: 1,
            description: "test".to_string(),
            action: AllPairsAction::Complete,
            distances: vec![
                vec![Distance::Finite(0), Distance::Finite(1), Distance::Finite(3)],
                vec![Distance::Infinite, Distance::Finite(0), Distance::Finite(2)],
                vec![Distance::Infinite, Distance::Infinite, Distance::Finite(0)],
            ],
            next: vec![
                vec![None, Some(1), Some(1)],
                vec![None, None, Some(2)],
                vec![None, None, None],
            ],
            intermediate: None,
            pair: None,
            has_negative_cycle: Some(false),
        };
        assert_eq!(step.path(0, 2), Some(vec![0, 1, 2]));
        assert_eq!(step.path(2, 0), None);
        assert_eq!(step.path(1, 1), Some(vec![1]));
    }

    #[test]
    fn test_mst_auxiliary_serializes_engine_tag() {
        let aux = MstAuxiliary::Prim {
            visited: vec![true, false],
            frontier: vec![Edge::new(0, 1, 3)],
        };
        let json = serde_json::to_value(&aux).expect("Serialization should succeed in test");
        assert_eq!(json["engine"], "prim");
    }
}
