//! gitlog Core - Core library for changelog generation
//!
//! This crate provides the shared error taxonomy and the configuration
//! surface used by the gitlog engine and CLI.

pub mod config;
pub mod error;

pub use config::{Config, FiltersConfig, FormatConfig, HistoryConfig, OutputConfig};
pub use error::{ConfigError, GitError, GitlogError, RenderError, Result};
