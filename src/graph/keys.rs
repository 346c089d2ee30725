//! Stable node identity for code handles.
//!
//! Graph deduplication hinges on every code handle mapping to one
//! stable, globally unique string. Module-qualified names are the
//! preferred form; code with no resolvable module falls back to a
//! file-path qualifier so that it still gets a distinct key, and
//! built-in markers pass through verbatim.

use crate::stats::resolve::{ModuleResolver, NoModuleResolver};
use crate::stats::schema::CodeHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable string identity of a graph node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Derives [`NodeKey`]s from code handles.
///
/// Pure and total: every well-formed handle yields a key. The
/// module resolver is consulted only for file-scoped handles.
pub struct KeyGenerator<'a> {
    resolver: &'a dyn ModuleResolver,
}

impl<'a> KeyGenerator<'a> {
    pub fn new(resolver: &'a dyn ModuleResolver) -> Self {
        Self { resolver }
    }

    /// Generator that performs no module resolution. File-scoped
    /// handles always take the file-path fallback.
    pub fn unresolved() -> KeyGenerator<'static> {
        KeyGenerator {
            resolver: &NoModuleResolver,
        }
    }

    /// Generate the key for a code handle.
    ///
    /// Resolution policy, in order:
    /// 1. built-in markers pass through verbatim;
    /// 2. handles with a known module use `module.name`;
    /// 3. file-scoped handles use `module.name` if the resolver
    ///    finds a module for the file, else `file.name`.
    ///
    /// Nested and closure functions contribute only their immediate
    /// declared name, so same-named siblings in one module share a
    /// key. That matches the identity granularity of the profiler
    /// itself.
    pub fn generate_key(&self, code: &CodeHandle) -> NodeKey {
        match code {
            CodeHandle::Builtin { marker } => NodeKey(marker.clone()),
            CodeHandle::Named { module, name } => NodeKey(format!("{module}.{name}")),
            CodeHandle::FileScoped { file, name } => match self.resolver.resolve_module(file) {
                Some(module) => NodeKey(format!("{module}.{name}")),
                None => NodeKey(format!("{}.{}", file.display(), name)),
            },
        }
    }
}
