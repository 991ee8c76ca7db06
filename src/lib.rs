//! AlgoTrace - step-by-step execution traces for classical algorithms
//!
//! Nine engines (Dijkstra, Bellman-Ford, Floyd-Warshall, Kruskal, Prim, naive
//! matching, KMP, Rabin-Karp and Huffman coding) each run to completion and
//! return an immutable trace of state snapshots. A playback controller then
//! lets a renderer step through, seek, or auto-play any trace.

pub mod config;
pub mod core;
pub mod services;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::{Distance, Edge, Graph, Trace, TraceStep, VizError, VizResult};
pub use crate::services::{run_algorithm, AlgorithmRequest, AlgorithmTrace, PlaybackController};
