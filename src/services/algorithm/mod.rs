//! 算法模块
//!
//! 九个带轨迹的算法引擎：最短路径、最小生成树、字符串匹配与 Huffman 编码。
//! 每个引擎都是纯函数，输入相同则轨迹相同。

pub mod bellman_ford;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod huffman;
pub mod kmp;
pub mod kruskal;
pub mod naive;
pub mod prim;
pub mod rabin_karp;
pub mod string;
pub mod types;
pub mod union_find;

// 重新导出常用算法结构体
pub use bellman_ford::{BellmanFord, BellmanFordResult};
pub use dijkstra::Dijkstra;
pub use floyd_warshall::{FloydWarshall, FLOYD_WARSHALL_INFINITY};
pub use huffman::{Huffman, HuffmanAction, HuffmanNode, HuffmanOutcome, HuffmanStep, NodeId};
pub use kmp::Kmp;
pub use kruskal::Kruskal;
pub use naive::NaiveMatcher;
pub use prim::Prim;
pub use rabin_karp::{RabinKarp, RabinKarpParams};
pub use types::{
    AllPairsAction, AllPairsStep, MatchAction, MatchStep, MstAction, MstAuxiliary, MstStep,
    RollingHashState, ShortestPathAction, ShortestPathStep,
};
pub use union_find::UnionFind;
