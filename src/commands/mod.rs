//! CLI command implementations.

pub mod inspect;
pub mod render;

pub use inspect::execute_inspect;
pub use render::{execute_render, validate_args, RenderArgs};
