//! 回放模块
//!
//! 与算法无关：任何步骤类型的轨迹都可以交给控制器逐步浏览或自动播放。

pub mod controller;
pub mod state;

pub use controller::{PlaybackController, MIN_TICK_INTERVAL};
pub use state::{Playback, PlaybackPhase, PlaybackPosition};
