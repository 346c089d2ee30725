//! Call graph construction from profiler statistics.

pub mod builder;
pub mod callgraph;
pub mod keys;

pub use builder::create_graph;
pub use callgraph::CallGraph;
pub use keys::{KeyGenerator, NodeKey};
