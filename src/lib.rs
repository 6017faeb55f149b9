//! genpass — generate `key=value` secret files from a template (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod generator;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod template;
pub mod words;
