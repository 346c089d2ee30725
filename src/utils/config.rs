//! Configuration and constants for the CLI and library.

/// Current stats dump schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Environ key holding the request path in WSGI-style request
/// context mappings
pub const PATH_INFO_KEY: &str = "PATH_INFO";

/// Graphviz layout program used for rendering (hierarchical layout)
pub const DEFAULT_LAYOUT_PROGRAM: &str = "dot";

/// Raster format used when the output extension gives no hint
pub const DEFAULT_RENDER_FORMAT: &str = "png";
