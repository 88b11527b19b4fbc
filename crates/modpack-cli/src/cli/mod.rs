//! Command-line interface definition.
//!
//! - `modpack pack` - one archive per module
//! - `modpack snapshot` - one JSON snapshot per module
//! - `modpack resolve` - show the files a module's archive would contain
//! - `modpack check` - consistency report for the index and metadata documents
//! - `modpack files` - pack an explicit file list into one archive
//! - `modpack schema` - print the JSON schema of `modpack.config.json`

mod commands;
pub mod enums;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{CheckArgs, Command, FilesArgs, PackArgs, ResolveArgs, SnapshotArgs};
pub use enums::*;
pub use validation::{parse_artifact_name, parse_jobs, parse_level, parse_max_archives};

/// modpack - per-module archives of a module corpus
#[derive(Parser, Debug)]
#[command(
    name = "modpack",
    version,
    about = "Package module sources into per-module archives",
    long_about = "modpack reads a module index and its metadata, resolves the transitive\n\
                  file set of every module and writes one self-contained archive per module\n\
                  (.tar.gz, .zip or .lzma.zip) or a JSON snapshot of the file contents."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    ///
    /// The per-module report on stdout is still printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the configuration file
    ///
    /// Defaults to modpack.config.json in the working directory when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
