//! 核心模块：错误类型、图模型与轨迹协议

pub mod error;
pub mod types;

pub use error::{VizError, VizResult};
pub use types::{
    Distance, Edge, Graph, Neighbor, Trace, TraceRecorder, TraceStep, PATH_WEIGHT_LIMIT,
};
