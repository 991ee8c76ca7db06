//! 服务层模块
//!
//! 算法引擎、请求分发和回放控制

pub mod algorithm;
pub mod playback;
pub mod runner;

// 重新导出常用服务
pub use algorithm::*;
pub use playback::{Playback, PlaybackController, PlaybackPhase, PlaybackPosition};
pub use runner::{run_algorithm, run_algorithm_with, AlgorithmRequest, AlgorithmTrace, GraphInput};
