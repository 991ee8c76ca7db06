//! 图模型
//!
//! 由顶点数和带权边列表构成。无向算法（MST、Dijkstra）通过对称邻接视图遍历，
//! 有向算法（Bellman-Ford、Floyd-Warshall）直接使用边列表，原始边列表始终不变。

use serde::{Deserialize, Serialize};

use crate::core::error::{VizError, VizResult};

/// 路径权重之和的上界，同时也是全源最短路径里的不可达哨兵值
///
/// 任意一条边的 `|weight| * vertex_count` 必须小于它，因此至多
/// `vertex_count` 条边的路径和不会溢出，也不会与哨兵值混淆。
pub const PATH_WEIGHT_LIMIT: i64 = i64::MAX / 4;

/// 带权边，身份由 `(from, to)` 决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: i64,
}

impl Edge {
    pub fn new(from: usize, to: usize, weight: i64) -> Self {
        Self { from, to, weight }
    }

    /// 给定一个端点，返回另一个端点
    pub fn other(&self, vertex: usize) -> usize {
        if self.from == vertex {
            self.to
        } else {
            self.from
        }
    }
}

impl From<(usize, usize, i64)> for Edge {
    fn from((from, to, weight): (usize, usize, i64)) -> Self {
        Self::new(from, to, weight)
    }
}

/// 邻接表中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub vertex: usize,
    pub weight: i64,
}

/// 已校验的图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// 构造并校验图：至少一个顶点，所有端点都在 `[0, vertex_count)` 内，
    /// 边权的绝对值乘以顶点数小于 [`PATH_WEIGHT_LIMIT`]
    pub fn new(vertex_count: usize, edges: Vec<Edge>) -> VizResult<Self> {
        if vertex_count == 0 {
            return Err(VizError::InvalidGraph(
                "graph must have at least one vertex".to_string(),
            ));
        }

        for edge in &edges {
            for vertex in [edge.from, edge.to] {
                if vertex >= vertex_count {
                    return Err(VizError::VertexOutOfRange {
                        vertex,
                        vertex_count,
                    });
                }
            }
            let bound = u128::from(edge.weight.unsigned_abs()) * vertex_count as u128;
            if bound >= PATH_WEIGHT_LIMIT as u128 {
                return Err(VizError::InvalidParameter(format!(
                    "weight {} of edge {} -> {} is too large for a graph with {} vertices",
                    edge.weight, edge.from, edge.to, vertex_count
                )));
            }
        }

        Ok(Self {
            vertex_count,
            edges,
        })
    }

    /// 从 `(from, to, weight)` 三元组构造
    pub fn from_triples(vertex_count: usize, triples: &[(usize, usize, i64)]) -> VizResult<Self> {
        Self::new(vertex_count, triples.iter().copied().map(Edge::from).collect())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count
    }

    /// 检查顶点是否存在，供需要起点的算法请求使用
    pub fn check_vertex(&self, vertex: usize) -> VizResult<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(VizError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count,
            })
        }
    }

    /// 对称邻接视图：每条边在两个端点上各出现一次，顺序与边列表一致
    pub fn undirected_adjacency(&self) -> Vec<Vec<Neighbor>> {
        let mut adjacency = vec![Vec::new(); self.vertex_count];
        for edge in &self.edges {
            adjacency[edge.from].push(Neighbor {
                vertex: edge.to,
                weight: edge.weight,
            });
            if edge.from != edge.to {
                adjacency[edge.to].push(Neighbor {
                    vertex: edge.from,
                    weight: edge.weight,
                });
            }
        }
        adjacency
    }
}
