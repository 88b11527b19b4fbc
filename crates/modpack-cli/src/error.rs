//! Error types for the modpack CLI.
//!
//! - [`CliError`] is what every command returns; domain errors convert into
//!   it through `#[from]`.
//! - [`ConfigError`] covers loading and validating `modpack.config.json`.
//! - [`PackError`] covers packaging outcomes the CLI treats as fatal.
//!
//! ```rust,no_run
//! use modpack_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_index(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod report;

pub use report::cli_error_to_miette;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Packaging error: {0}")]
    Pack(#[from] PackError),

    /// Index or metadata document could not be loaded.
    #[error("Module graph error: {0}")]
    Graph(#[from] modpack_graph::Error),

    #[error("Packaging error: {0}")]
    Bundler(#[from] modpack_bundler::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}\n\nHint: Create a modpack.config.json file or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    #[error("Conflicting options: {0}\n\nHint: These options cannot be used together")]
    ConflictingOptions(String),

    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Packaging failures that abort the command.
#[derive(Debug, Error)]
pub enum PackError {
    /// Writing the only requested module failed.
    #[error("Module '{module}' was not packaged: {source}")]
    ModuleFailed {
        module: String,
        #[source]
        source: modpack_bundler::Error,
    },

    /// The run was interrupted before all modules were processed.
    #[error("Cancelled after {archives} archive(s)\n\nHint: Re-run the command to finish the remaining modules")]
    Cancelled { archives: usize },

    #[error("Output path exists but is not a directory: {}", .0.display())]
    OutputNotADirectory(PathBuf),

    /// The background packaging task panicked or was aborted.
    #[error("Packaging task failed: {0}")]
    Task(String),
}

/// Result alias with [`CliError`] as the default error.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Path context for I/O results.
pub trait ResultExt<T> {
    /// Report a not-found error as [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(err) if err.kind() == ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
