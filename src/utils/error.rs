//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs
//! and commands.

use thiserror::Error;

/// Errors that can occur while reading or writing statistics dumps
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stats JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while rendering a call graph.
///
/// Rendering delegates entirely to the external layout engine; its
/// failures are surfaced here unmodified, never suppressed.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to run layout engine '{program}': {source}")]
    EngineUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("layout engine exited with {status}: {stderr}")]
    EngineFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
