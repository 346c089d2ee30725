//! Module resolution for file-scoped code handles.
//!
//! The profiler frequently reports frames by source file only. Key
//! generation wants module-qualified names where possible, so the
//! file→module lookup is injected as a capability: production code
//! supplies a symbol table built at instrumentation time, tests
//! supply a double.

use crate::utils::error::StatsError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Maps a source file path to the module defined in it.
///
/// Implementations must be side-effect-free; resolution may run
/// concurrently from multiple sessions.
pub trait ModuleResolver: Sync {
    fn resolve_module(&self, file: &Path) -> Option<String>;
}

/// Resolver that never finds a module. File-scoped handles keep
/// their file-path-qualified keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModuleResolver;

impl ModuleResolver for NoModuleResolver {
    fn resolve_module(&self, _file: &Path) -> Option<String> {
        None
    }
}

/// Resolver backed by a file→module lookup table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTableResolver {
    modules: HashMap<PathBuf, String>,
}

impl SymbolTableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<PathBuf>, module: impl Into<String>) {
        self.modules.insert(file.into(), module.into());
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Load a symbol table from a JSON file mapping file paths to
    /// module names.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref();
        debug!("Loading symbol table from: {}", path.display());

        let file = File::open(path).map_err(StatsError::Io)?;
        let resolver: Self = serde_json::from_reader(file).map_err(StatsError::Json)?;

        debug!("Symbol table loaded: {} entries", resolver.len());
        Ok(resolver)
    }
}

impl ModuleResolver for SymbolTableResolver {
    fn resolve_module(&self, file: &Path) -> Option<String> {
        self.modules.get(file).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_resolver_always_none() {
        assert_eq!(NoModuleResolver.resolve_module(Path::new("app.py")), None);
    }

    #[test]
    fn test_symbol_table_lookup() {
        let mut resolver = SymbolTableResolver::new();
        resolver.insert("src/app/views.py", "app.views");

        assert_eq!(
            resolver.resolve_module(Path::new("src/app/views.py")),
            Some("app.views".to_string())
        );
        assert_eq!(resolver.resolve_module(Path::new("src/other.py")), None);
    }

    #[test]
    fn test_symbol_table_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"lib/core.py": "core"}}"#).unwrap();

        let resolver = SymbolTableResolver::from_file(file.path()).unwrap();
        assert_eq!(
            resolver.resolve_module(Path::new("lib/core.py")),
            Some("core".to_string())
        );
    }
}
