//! Layered configuration for the CLI.
//!
//! Values are resolved from, in decreasing priority: explicit command-line flags,
//! `-S key=value` overrides, the TOML file, and the built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;

pub use builder::{build_run_config, build_sweep_config};
