//! Profiler statistics: data model, JSON ingestion, and
//! module resolution.

pub mod io;
pub mod resolve;
pub mod schema;

pub use io::{read_stats, write_stats};
pub use resolve::{ModuleResolver, NoModuleResolver, SymbolTableResolver};
pub use schema::{CallerEntry, CodeHandle, RawStatEntry, Timing};
