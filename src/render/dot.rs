//! DOT serialization and Graphviz rendering dispatch.
//!
//! The graph itself is the only algorithmic work in this crate;
//! layout and rasterization belong to Graphviz. This module only
//! serializes a [`CallGraph`] to DOT and pipes it into the layout
//! program, surfacing engine failures unmodified.

use crate::graph::callgraph::CallGraph;
use crate::utils::config::{DEFAULT_LAYOUT_PROGRAM, DEFAULT_RENDER_FORMAT};
use crate::utils::error::RenderError;
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Layout program to invoke. `dot` gives the hierarchical layout
    /// appropriate for call graphs.
    pub program: String,

    /// Output format passed as `-T`. When `None`, derived from the
    /// output file extension, falling back to PNG.
    pub format: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_LAYOUT_PROGRAM.to_string(),
            format: None,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    fn format_for(&self, output_path: &Path) -> String {
        if let Some(format) = &self.format {
            return format.clone();
        }
        output_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_RENDER_FORMAT.to_string())
    }
}

/// Serialize a call graph to DOT.
///
/// Output is deterministic: nodes and edges are emitted in sorted
/// key order. Node labels carry cumulative time and call counts;
/// edge labels carry per-relationship call counts.
pub fn to_dot(graph: &CallGraph) -> String {
    let mut lines = Vec::new();

    lines.push("digraph callgraph {".to_string());
    lines.push("    rankdir=TB;".to_string());
    lines.push("    node [shape=box, fontname=\"Helvetica\", fontsize=11];".to_string());
    lines.push("    edge [fontname=\"Helvetica\", fontsize=9];".to_string());
    lines.push(String::new());

    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort();
    for key in nodes {
        let timing = graph.node_timing(key).copied().unwrap_or_default();
        lines.push(format!(
            "    \"{}\" [label=\"{}\\n{:.4}s cumulative / {} calls\"];",
            escape(key.as_str()),
            escape(key.as_str()),
            timing.cumulative_time,
            timing.total_calls,
        ));
    }

    lines.push(String::new());

    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    for (caller, callee, timing) in edges {
        lines.push(format!(
            "    \"{}\" -> \"{}\" [label=\"{}\"];",
            escape(caller.as_str()),
            escape(callee.as_str()),
            timing.total_calls,
        ));
    }

    lines.push("}".to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Render a call graph to `output_path` with the default
/// configuration (hierarchical `dot` layout, format from the file
/// extension).
pub fn draw_graph(graph: &CallGraph, output_path: impl AsRef<Path>) -> Result<(), RenderError> {
    draw_graph_with(graph, output_path, &RenderConfig::default())
}

/// Render a call graph to `output_path`.
///
/// Pure dispatch: the DOT text is piped into the layout program,
/// which writes the output file itself. Never mutates the graph.
/// Any engine failure (missing binary, bad path, non-zero exit)
/// propagates to the caller unmodified.
pub fn draw_graph_with(
    graph: &CallGraph,
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let output_path = output_path.as_ref();
    let format = config.format_for(output_path);
    let dot_source = to_dot(graph);

    info!(
        "Rendering {} nodes / {} edges to {} via '{}'",
        graph.node_count(),
        graph.edge_count(),
        output_path.display(),
        config.program
    );

    let mut child = Command::new(&config.program)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(output_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RenderError::EngineUnavailable {
            program: config.program.clone(),
            source,
        })?;

    // stdin is piped above, so take() cannot return None
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot_source.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(RenderError::EngineFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    debug!("Render complete: {}", output_path.display());
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
