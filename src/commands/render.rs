//! Render command implementation.
//!
//! The render command:
//! 1. Reads a statistics dump
//! 2. Loads the optional symbol table
//! 3. Builds a profiling session
//! 4. Renders the call graph through Graphviz
//! 5. Optionally writes the DOT source alongside

use crate::graph::keys::KeyGenerator;
use crate::render::dot::{draw_graph_with, to_dot, RenderConfig};
use crate::session::{Environ, ProfilingSession};
use crate::stats::io::read_stats;
use crate::stats::resolve::{ModuleResolver, NoModuleResolver, SymbolTableResolver};
use crate::utils::config::PATH_INFO_KEY;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Path to the statistics dump (JSON)
    pub stats: PathBuf,

    /// Output path for the rendered image
    pub output: PathBuf,

    /// Optional path to also write the DOT source
    pub dot_output: Option<PathBuf>,

    /// Optional symbol table for module resolution
    pub symbols: Option<PathBuf>,

    /// Request path to record on the session
    pub path_info: Option<String>,

    /// Layout program (hierarchical `dot` by default)
    pub program: String,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            stats: PathBuf::from("stats.json"),
            output: PathBuf::from("callgraph.png"),
            dot_output: None,
            symbols: None,
            path_info: None,
            program: "dot".to_string(),
        }
    }
}

/// Reject argument combinations that cannot work before any file is
/// touched.
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path is empty");
    }
    if args.program.is_empty() {
        anyhow::bail!("Layout program is empty");
    }
    Ok(())
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
pub fn execute_render(args: RenderArgs) -> Result<()> {
    info!("Rendering call graph from: {}", args.stats.display());

    let stats = read_stats(&args.stats)
        .with_context(|| format!("Failed to read stats from {}", args.stats.display()))?;
    debug!("Loaded {} stats entries", stats.len());

    let resolver = load_resolver(args.symbols.as_deref())?;
    let keys = KeyGenerator::new(resolver.as_ref());

    let environ = args.path_info.as_ref().map(|path| {
        Environ::from([(PATH_INFO_KEY.to_string(), path.clone())])
    });

    let session = ProfilingSession::new(&stats, &keys, environ.as_ref(), Some(Utc::now()));
    let graph = session.graph();

    info!(
        "Session {}: {} nodes, {} edges",
        session.uuid(),
        graph.node_count(),
        graph.edge_count()
    );

    if let Some(dot_path) = &args.dot_output {
        std::fs::write(dot_path, to_dot(graph))
            .with_context(|| format!("Failed to write DOT to {}", dot_path.display()))?;
        println!("✓ DOT source written to: {}", dot_path.display());
    }

    let config = RenderConfig::new().with_program(&args.program);
    draw_graph_with(graph, &args.output, &config)
        .with_context(|| format!("Failed to render {}", args.output.display()))?;

    println!("✓ Call graph rendered to: {}", args.output.display());
    println!("  Session: {}", session.uuid());
    if let Some(path) = session.path() {
        println!("  Path: {path}");
    }

    Ok(())
}

fn load_resolver(symbols: Option<&std::path::Path>) -> Result<Box<dyn ModuleResolver>> {
    match symbols {
        Some(path) => {
            let resolver = SymbolTableResolver::from_file(path)
                .with_context(|| format!("Failed to load symbol table {}", path.display()))?;
            Ok(Box::new(resolver))
        }
        None => Ok(Box::new(NoModuleResolver)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_rejects_empty_output() {
        let args = RenderArgs {
            output: PathBuf::new(),
            ..RenderArgs::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_accepts_defaults() {
        assert!(validate_args(&RenderArgs::default()).is_ok());
    }
}
