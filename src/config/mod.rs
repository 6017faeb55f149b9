//! Configuration loading and layering.
//!
//! Handles `.genpass.toml` loading, environment variable resolution,
//! and the global config file.

pub mod loader;

pub use loader::{Config, ConfigError, OutputConfig, WordsConfig, check_separator};
