//! 算法请求的校验与分发
//!
//! 外部输入层（渲染器、命令行）提交一条 JSON 请求，按 `algorithm` 字段选择引擎。
//! 图在这里经过 [`Graph::new`] 校验，起点和哈希参数也在这里检查，
//! 之后引擎只会收到有效输入。字符串输入不做额外限制：空模式或比文本长的模式
//! 得到空轨迹，与直接调用引擎的行为一致。

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::RabinKarpConfig;
use crate::core::{Edge, Graph, Trace, TraceStep, VizResult};
use crate::services::algorithm::{
    AllPairsStep, BellmanFord, Dijkstra, FloydWarshall, Huffman, HuffmanOutcome, Kmp, Kruskal,
    MatchStep, MstStep, NaiveMatcher, Prim, RabinKarp, RabinKarpParams, ShortestPathStep,
};

/// 图输入：顶点数和边列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    pub vertex_count: usize,
    pub edges: Vec<Edge>,
}

impl GraphInput {
    pub fn build(&self) -> VizResult<Graph> {
        Graph::new(self.vertex_count, self.edges.clone())
    }
}

/// 九种算法的输入记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmRequest {
    Dijkstra {
        #[serde(flatten)]
        graph: GraphInput,
        source: usize,
    },
    BellmanFord {
        #[serde(flatten)]
        graph: GraphInput,
        source: usize,
    },
    FloydWarshall {
        #[serde(flatten)]
        graph: GraphInput,
    },
    Kruskal {
        #[serde(flatten)]
        graph: GraphInput,
    },
    Prim {
        #[serde(flatten)]
        graph: GraphInput,
        #[serde(default)]
        start: usize,
    },
    Naive {
        text: String,
        pattern: String,
    },
    Kmp {
        text: String,
        pattern: String,
    },
    RabinKarp {
        text: String,
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prime: Option<u64>,
    },
    Huffman {
        text: String,
    },
}

impl AlgorithmRequest {
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmRequest::Dijkstra { .. } => "dijkstra",
            AlgorithmRequest::BellmanFord { .. } => "bellman_ford",
            AlgorithmRequest::FloydWarshall { .. } => "floyd_warshall",
            AlgorithmRequest::Kruskal { .. } => "kruskal",
            AlgorithmRequest::Prim { .. } => "prim",
            AlgorithmRequest::Naive { .. } => "naive",
            AlgorithmRequest::Kmp { .. } => "kmp",
            AlgorithmRequest::RabinKarp { .. } => "rabin_karp",
            AlgorithmRequest::Huffman { .. } => "huffman",
        }
    }

    pub fn from_json(json: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 任意一种引擎产生的轨迹
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum AlgorithmTrace {
    ShortestPath(Trace<ShortestPathStep>),
    AllPairs(Trace<AllPairsStep>),
    Mst(Trace<MstStep>),
    Match(Trace<MatchStep>),
    Huffman(HuffmanOutcome),
}

impl AlgorithmTrace {
    pub fn len(&self) -> usize {
        match self {
            AlgorithmTrace::ShortestPath(trace) => trace.len(),
            AlgorithmTrace::AllPairs(trace) => trace.len(),
            AlgorithmTrace::Mst(trace) => trace.len(),
            AlgorithmTrace::Match(trace) => trace.len(),
            AlgorithmTrace::Huffman(outcome) => outcome.trace.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按顺序列出每一步的序号和描述
    pub fn descriptions(&self) -> Vec<(usize, String)> {
        fn collect<S: TraceStep>(trace: &Trace<S>) -> Vec<(usize, String)> {
            trace
                .iter()
                .map(|step| (step.index(), step.description().to_string()))
                .collect()
        }

        match self {
            AlgorithmTrace::ShortestPath(trace) => collect(trace),
            AlgorithmTrace::AllPairs(trace) => collect(trace),
            AlgorithmTrace::Mst(trace) => collect(trace),
            AlgorithmTrace::Match(trace) => collect(trace),
            AlgorithmTrace::Huffman(outcome) => collect(&outcome.trace),
        }
    }

    pub fn to_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 使用默认 Rabin-Karp 参数执行请求
pub fn run_algorithm(request: AlgorithmRequest) -> VizResult<AlgorithmTrace> {
    run_algorithm_with(request, &RabinKarpConfig::default())
}

/// 执行请求；请求中缺省的 Rabin-Karp 参数取自 `defaults`
pub fn run_algorithm_with(
    request: AlgorithmRequest,
    defaults: &RabinKarpConfig,
) -> VizResult<AlgorithmTrace> {
    let name = request.name();
    debug!("Running {} request", name);

    let trace = match request {
        AlgorithmRequest::Dijkstra { graph, source } => {
            let graph = graph.build()?;
            graph.check_vertex(source)?;
            AlgorithmTrace::ShortestPath(Dijkstra::run(&graph, source))
        }
        AlgorithmRequest::BellmanFord { graph, source } => {
            let graph = graph.build()?;
            graph.check_vertex(source)?;
            AlgorithmTrace::ShortestPath(BellmanFord::run(&graph, source))
        }
        AlgorithmRequest::FloydWarshall { graph } => {
            AlgorithmTrace::AllPairs(FloydWarshall::run(&graph.build()?))
        }
        AlgorithmRequest::Kruskal { graph } => AlgorithmTrace::Mst(Kruskal::run(&graph.build()?)),
        AlgorithmRequest::Prim { graph, start } => {
            let graph = graph.build()?;
            graph.check_vertex(start)?;
            AlgorithmTrace::Mst(Prim::run(&graph, start))
        }
        AlgorithmRequest::Naive { text, pattern } => {
            AlgorithmTrace::Match(NaiveMatcher::run(&text, &pattern))
        }
        AlgorithmRequest::Kmp { text, pattern } => AlgorithmTrace::Match(Kmp::run(&text, &pattern)),
        AlgorithmRequest::RabinKarp {
            text,
            pattern,
            base,
            prime,
        } => {
            let params = RabinKarpParams::new(
                base.unwrap_or(defaults.base),
                prime.unwrap_or(defaults.prime),
            )?;
            AlgorithmTrace::Match(RabinKarp::run(&text, &pattern, params))
        }
        AlgorithmRequest::Huffman { text } => AlgorithmTrace::Huffman(Huffman::run(&text)),
    };

    info!("{} produced {} steps", name, trace.len());
    Ok(trace)
}
