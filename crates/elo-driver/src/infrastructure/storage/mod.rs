//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module handles:
//!
//! - Reading an optional TOML configuration file.
//! - Providing sensible defaults when a section or field is absent.
//! - Merging command-line overrides on top of the file values.

pub mod config;
