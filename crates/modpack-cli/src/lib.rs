//! modpack CLI - per-module archive packaging from the command line.
//!
//! The binary wires [`modpack_graph`] and [`modpack_bundler`] together:
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`config`] - layered configuration (defaults, `modpack.config.json`,
//!   `MODPACK_*` environment variables, command-line flags)
//! - [`commands`] - one module per subcommand
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages, report formatting and spinners
//!
//! # Example
//!
//! ```rust,no_run
//! use modpack_cli::{config::ModpackConfig, error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     let config = ModpackConfig::load(&Default::default(), None)?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, PackError, Result, ResultExt};
