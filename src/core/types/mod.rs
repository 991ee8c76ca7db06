//! 核心数据类型

pub mod distance;
pub mod graph;
pub mod trace;

pub use distance::Distance;
pub use graph::{Edge, Graph, Neighbor, PATH_WEIGHT_LIMIT};
pub use trace::{Trace, TraceRecorder, TraceStep};
