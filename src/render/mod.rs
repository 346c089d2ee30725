//! Call graph rendering through an external Graphviz layout engine.

pub mod dot;

pub use dot::{draw_graph, draw_graph_with, to_dot, RenderConfig};
