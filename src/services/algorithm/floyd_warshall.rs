//! Floyd-Warshall算法模块
//!
//! 有向图上的全源最短路径，时间复杂度O(V^3)。
//! 内部距离矩阵用有限哨兵值 [`FLOYD_WARSHALL_INFINITY`] 表示不可达，
//! 步骤快照中再转换为 [`Distance::Infinite`]。

use log::debug;

use crate::core::{Distance, Graph, Trace, TraceRecorder, PATH_WEIGHT_LIMIT};
use crate::services::algorithm::types::{AllPairsAction, AllPairsStep};

/// 不可达哨兵值，与 [`Graph`] 对边权的上界一致
pub const FLOYD_WARSHALL_INFINITY: i64 = PATH_WEIGHT_LIMIT;

/// Floyd-Warshall算法结构体
pub struct FloydWarshall;

struct Matrices {
    dist: Vec<Vec<i64>>,
    next: Vec<Vec<Option<usize>>>,
}

impl Matrices {
    fn snapshot(
        &self,
        index: usize,
        action: AllPairsAction,
        description: String,
        intermediate: Option<usize>,
        pair: Option<(usize, usize)>,
        has_negative_cycle: Option<bool>,
    ) -> AllPairsStep {
        AllPairsStep {
            index,
            description,
            action,
            distances: self
                .dist
                .iter()
                .map(|row| row.iter().map(|&d| to_distance(d)).collect())
                .collect(),
            next: self.next.clone(),
            intermediate,
            pair,
            has_negative_cycle,
        }
    }

    /// 对角线不参与更新，负权环通过某一对 `i -> k -> i` 的往返距离为负来识别
    fn has_negative_cycle(&self) -> bool {
        let n = self.dist.len();
        (0..n).any(|i| {
            (0..n).any(|k| {
                i != k
                    && self.dist[i][k] < FLOYD_WARSHALL_INFINITY
                    && self.dist[k][i] < FLOYD_WARSHALL_INFINITY
                    && self.dist[i][k].saturating_add(self.dist[k][i]) < 0
            })
        })
    }
}

fn to_distance(value: i64) -> Distance {
    if value >= FLOYD_WARSHALL_INFINITY {
        Distance::Infinite
    } else {
        Distance::Finite(value)
    }
}

fn format_distance(value: i64) -> String {
    to_distance(value).to_string()
}

impl FloydWarshall {
    /// 执行Floyd-Warshall算法并生成轨迹
    ///
    /// 边权可以为负；存在负权环时最后一步的 `has_negative_cycle` 为 `Some(true)`。
    pub fn run(graph: &Graph) -> Trace<AllPairsStep> {
        let n = graph.vertex_count();
        let mut recorder = TraceRecorder::new();

        // 初始化距离矩阵
        let mut m = Matrices {
            dist: vec![vec![FLOYD_WARSHALL_INFINITY; n]; n],
            next: vec![vec![None; n]; n],
        };
        for i in 0..n {
            m.dist[i][i] = 0;
        }
        // 填充直接连接的边
        for edge in graph.edges() {
            if edge.from != edge.to {
                m.dist[edge.from][edge.to] = edge.weight;
                m.next[edge.from][edge.to] = Some(edge.to);
            }
        }

        for k in 0..n {
            recorder.record(|index| {
                m.snapshot(
                    index,
                    AllPairsAction::Intermediate,
                    format!("Consider vertex {} as an intermediate vertex", k),
                    Some(k),
                    None,
                    None,
                )
            });

            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let d_ik = m.dist[i][k];
                    let d_kj = m.dist[k][j];
                    // 哨兵不参与加法，经过不可达顶点的路径不产生更新步骤
                    if d_ik >= FLOYD_WARSHALL_INFINITY || d_kj >= FLOYD_WARSHALL_INFINITY {
                        continue;
                    }

                    // 负权环会让距离成倍下降
                    let through_k = d_ik.saturating_add(d_kj);
                    if through_k < m.dist[i][j] {
                        let old = m.dist[i][j];
                        m.dist[i][j] = through_k;
                        m.next[i][j] = m.next[i][k];
                        recorder.record(|index| {
                            m.snapshot(
                                index,
                                AllPairsAction::Update,
                                format!(
                                    "Path {} -> {} -> {} ({}) beats {}: update dist[{}][{}]",
                                    i,
                                    k,
                                    j,
                                    through_k,
                                    format_distance(old),
                                    i,
                                    j
                                ),
                                Some(k),
                                Some((i, j)),
                                None,
                            )
                        });
                    }
                }
            }
        }

        let negative_cycle = m.has_negative_cycle()
            || graph
                .edges()
                .iter()
                .any(|edge| edge.from == edge.to && edge.weight < 0);
        recorder.record(|index| {
            m.snapshot(
                index,
                AllPairsAction::Complete,
                if negative_cycle {
                    "Floyd-Warshall complete: a negative cycle makes some distances undefined"
                        .to_string()
                } else {
                    "Floyd-Warshall complete: all-pairs shortest distances are final".to_string()
                },
                None,
                None,
                Some(negative_cycle),
            )
        });

        debug!(
            "Floyd-Warshall on {} vertices produced {} steps",
            n,
            recorder.len()
        );
        recorder.finish()
    }

    /// 只取最终的距离矩阵
    pub fn distance_matrix(graph: &Graph) -> Vec<Vec<Distance>> {
        Self::run(graph)
            .last()
            .map(|step| step.distances.clone())
            .unwrap_or_default()
    }
}
