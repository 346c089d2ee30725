//! Shared utilities: error types, configuration constants.

pub mod config;
pub mod error;
