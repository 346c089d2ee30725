//! Statistics schema definitions.
//!
//! These structs mirror what a call-profiling facility reports:
//! one entry per distinct function observed, each carrying its own
//! timing plus a mapping of the callers that invoked it. The core
//! never interprets the timing payload; it is passed through to
//! graph node/edge attributes untouched.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Opaque identity of a function/code unit as reported by the
/// profiler.
///
/// Profilers do not always know the defining module of a frame:
/// dynamically evaluated code carries only a file path (often a
/// placeholder like `<string>`), and native frames carry nothing
/// but a marker string. The three variants cover those cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodeHandle {
    /// Function whose defining module was known at instrumentation time.
    Named { module: String, name: String },

    /// Function known only by its originating source file.
    FileScoped { file: PathBuf, name: String },

    /// Built-in/native function with no resolvable source.
    Builtin { marker: String },
}

impl CodeHandle {
    pub fn named(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            module: module.into(),
            name: name.into(),
        }
    }

    pub fn file_scoped(file: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self::FileScoped {
            file: file.into(),
            name: name.into(),
        }
    }

    pub fn builtin(marker: impl Into<String>) -> Self {
        Self::Builtin {
            marker: marker.into(),
        }
    }

    /// The declared name of the code unit. For built-ins this is the
    /// whole marker string.
    pub fn name(&self) -> &str {
        match self {
            Self::Named { name, .. } | Self::FileScoped { name, .. } => name,
            Self::Builtin { marker } => marker,
        }
    }
}

/// Timing payload attached to an entry or a caller relationship.
///
/// Opaque to the graph core; units are whatever the profiler used
/// (typically seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Time spent in the function itself, excluding subcalls
    #[serde(default)]
    pub inline_time: f64,

    /// Time spent in the function and everything it called
    #[serde(default)]
    pub cumulative_time: f64,

    /// Non-recursive call count
    #[serde(default)]
    pub primitive_calls: u64,

    /// Total call count, recursion included
    #[serde(default)]
    pub total_calls: u64,
}

/// One caller relationship inside a [`RawStatEntry`]: the calling
/// code unit and the timing attributed to that caller→callee pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerEntry {
    pub code: CodeHandle,

    #[serde(default)]
    pub timing: Timing,
}

/// One profiler statistics entry: a function plus the callers that
/// invoked it during the run.
///
/// Top-level entries (entry points) have an empty `callers` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatEntry {
    /// The function this entry describes
    pub code: CodeHandle,

    /// Timing for the function itself
    #[serde(default)]
    pub timing: Timing,

    /// Callers observed invoking this function, with per-relationship timing
    #[serde(default)]
    pub callers: Vec<CallerEntry>,
}

impl RawStatEntry {
    pub fn new(code: CodeHandle, timing: Timing) -> Self {
        Self {
            code,
            timing,
            callers: Vec::new(),
        }
    }

    pub fn with_caller(mut self, code: CodeHandle, timing: Timing) -> Self {
        self.callers.push(CallerEntry { code, timing });
        self
    }
}
