//! Reqprof CLI
//!
//! Renders call graphs from profiler statistics dumps and inspects
//! per-request profiling sessions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use reqprof::commands::{execute_inspect, execute_render, validate_args, RenderArgs};
use reqprof::stats::read_stats;
use reqprof::utils::config::SCHEMA_VERSION;

/// Reqprof - call graph rendering for profiling sessions
#[derive(Parser, Debug)]
#[command(name = "reqprof")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a statistics dump as a call graph image
    Render {
        /// Path to the statistics dump (JSON)
        #[arg(short, long)]
        stats: PathBuf,

        /// Output path for the rendered image
        #[arg(short, long, default_value = "callgraph.png")]
        output: PathBuf,

        /// Also write the DOT source to this path
        #[arg(long)]
        dot: Option<PathBuf>,

        /// Symbol table JSON for module resolution
        #[arg(long)]
        symbols: Option<PathBuf>,

        /// Request path to record on the session
        #[arg(long)]
        path_info: Option<String>,

        /// Graphviz layout program
        #[arg(long, default_value = "dot")]
        program: String,
    },

    /// Summarize the call graph of a statistics dump
    Inspect {
        /// Path to the statistics dump (JSON)
        #[arg(short, long)]
        stats: PathBuf,

        /// Symbol table JSON for module resolution
        #[arg(long)]
        symbols: Option<PathBuf>,

        /// Number of heaviest functions to show
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Validate a statistics dump file
    Validate {
        /// Path to the statistics dump (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            stats,
            output,
            dot,
            symbols,
            path_info,
            program,
        } => {
            let args = RenderArgs {
                stats,
                output,
                dot_output: dot,
                symbols,
                path_info,
                program,
            };

            validate_args(&args)?;
            execute_render(args)?;
        }

        Commands::Inspect {
            stats,
            symbols,
            top,
        } => {
            execute_inspect(stats, symbols, top)?;
        }

        Commands::Validate { file } => {
            validate_stats_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a statistics dump file
fn validate_stats_file(file_path: PathBuf) -> Result<()> {
    println!("Validating stats dump: {}", file_path.display());

    let stats = read_stats(&file_path)?;

    let with_callers = stats.iter().filter(|e| !e.callers.is_empty()).count();

    println!("✓ Valid stats dump");
    println!("  Entries: {}", stats.len());
    println!("  Entries with callers: {with_callers}");
    println!("  Top-level entries: {}", stats.len() - with_callers);

    Ok(())
}

/// Display version information
fn display_version() {
    println!("Reqprof v{}", env!("CARGO_PKG_VERSION"));
    println!("Stats Schema: v{SCHEMA_VERSION}");
    println!();
    println!("Call graph rendering for per-request profiling sessions.");
}
