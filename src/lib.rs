//! Reqprof
//!
//! Call graph construction and per-request profiling
//! session capture.
//!
//! This crate turns raw profiler statistics (caller/callee
//! pairs with timing data) into a deduplicated directed call
//! graph, wraps one profiling run in a [`session::ProfilingSession`],
//! and hands the graph to Graphviz for rendering.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install reqprof
//! reqprof --help
//! ```

pub mod commands;
pub mod graph;
pub mod render;
pub mod session;
pub mod stats;
pub mod utils;
