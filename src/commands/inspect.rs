//! Inspect command implementation.
//!
//! Builds the call graph from a statistics dump and prints a
//! summary: counts plus the heaviest functions by cumulative time.

use crate::graph::builder::create_graph;
use crate::graph::keys::KeyGenerator;
use crate::stats::io::read_stats;
use crate::stats::resolve::{NoModuleResolver, SymbolTableResolver};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Execute the inspect command
///
/// **Public** - main entry point called from main.rs
pub fn execute_inspect(stats_path: PathBuf, symbols: Option<PathBuf>, top: usize) -> Result<()> {
    let stats = read_stats(&stats_path)
        .with_context(|| format!("Failed to read stats from {}", stats_path.display()))?;

    info!("Inspecting {} stats entries", stats.len());

    let symbol_table;
    let keys = match &symbols {
        Some(path) => {
            symbol_table = SymbolTableResolver::from_file(path)
                .with_context(|| format!("Failed to load symbol table {}", path.display()))?;
            KeyGenerator::new(&symbol_table)
        }
        None => KeyGenerator::new(&NoModuleResolver),
    };

    let graph = create_graph(&stats, &keys);

    println!("Call graph for: {}", stats_path.display());
    println!("  Functions: {}", graph.node_count());
    println!("  Call relationships: {}", graph.edge_count());
    println!();

    let mut ranked: Vec<_> = graph
        .nodes()
        .map(|key| (key, graph.node_timing(key).copied().unwrap_or_default()))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.cumulative_time
            .partial_cmp(&a.1.cumulative_time)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    println!("Heaviest functions (cumulative time):");
    for (key, timing) in ranked.iter().take(top) {
        println!(
            "  {:>10.4}s  {:>8} calls  {}",
            timing.cumulative_time, timing.total_calls, key
        );
    }

    if ranked.len() > top {
        println!("  (showing top {} of {})", top, ranked.len());
    }

    Ok(())
}
