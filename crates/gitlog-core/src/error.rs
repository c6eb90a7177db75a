//! Error types for gitlog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GitlogError
pub type Result<T> = std::result::Result<T, GitlogError>;

/// Error type for the configuration surface of gitlog.
///
/// Git and render failures keep their own types, since the engine handles
/// them instead of propagating them.
#[derive(Debug, Error)]
pub enum GitlogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository root could be discovered from the start path
    #[error("No git repository found at or above {0}")]
    NoRepositoryFound(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// A path that should be inside the work tree is not
    #[error("Path is outside the repository work tree: {0}")]
    PathOutsideRepository(PathBuf),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

impl GitError {
    /// Whether this is the "no repository" signal rather than an I/O failure
    pub fn is_no_repository(&self) -> bool {
        matches!(self, Self::NoRepositoryFound(_))
    }
}

/// Rendering-related errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to write rendered output
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize rendered output
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// Render call after the sink was closed
    #[error("Sink '{0}' is already closed")]
    Closed(String),
}
