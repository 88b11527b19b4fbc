use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::{parse_artifact_name, parse_jobs, parse_level, parse_max_archives};

/// Available modpack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one archive per module
    ///
    /// Resolves every requested module (all indexed modules when none are
    /// named) to its transitive file set and writes `<module><suffix>` into
    /// the output directory. Prints one report line per archive and a summary.
    Pack(PackArgs),

    /// Write one JSON snapshot per module
    ///
    /// The snapshot is an array of {"file_name", "content"} objects holding
    /// the full text of every resolved file.
    Snapshot(SnapshotArgs),

    /// Show what a module's archive would contain
    Resolve(ResolveArgs),

    /// Report inconsistencies in the index and metadata documents
    ///
    /// Lists imports that have no record and are not declared missing, and
    /// the imports hidden behind every excluded or preloaded module.
    Check(CheckArgs),

    /// Pack an explicit list of files into a single archive
    ///
    /// The files are not resolved through the module index.
    Files(FilesArgs),

    /// Print the JSON schema of modpack.config.json
    Schema,
}

/// Arguments for the pack command
#[derive(Args, Debug, Default)]
pub struct PackArgs {
    /// Modules to pack (default: every indexed module)
    ///
    /// When exactly one module is named, failing to pack it is an error.
    ///
    /// Examples:
    ///   modpack pack
    ///   modpack pack platform xml.sax.handler
    #[arg(value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Archive format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<Format>,

    /// Compression level (0-9)
    #[arg(short = 'l', long, value_parser = parse_level)]
    pub level: Option<u32>,

    /// Stop after this many archives were written
    ///
    /// Intended for quick trial runs over a large corpus. Forces sequential
    /// packing.
    #[arg(long, value_name = "N", value_parser = parse_max_archives)]
    pub max_archives: Option<usize>,

    /// Number of worker threads
    #[arg(short = 'j', long, value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Root directory of the module sources
    #[arg(short = 'm', long, value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,

    /// Output directory for the archives
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Empty the output directory before packing
    #[arg(long)]
    pub clean: bool,
}

/// Arguments for the snapshot command
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Modules to snapshot
    #[arg(required = true, value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Root directory of the module sources
    #[arg(short = 'm', long, value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,

    /// Output directory for the snapshots
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Module to resolve
    #[arg(value_name = "MODULE")]
    pub module: String,

    /// Root directory of the module sources
    #[arg(short = 'm', long, value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,

    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Root directory of the module sources
    #[arg(short = 'm', long, value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,

    /// Fail when an import has no record and is not declared missing
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the files command
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Archive base name; the format suffix is appended
    #[arg(value_name = "NAME", value_parser = parse_artifact_name)]
    pub name: String,

    /// Files to pack, relative to --files-dir
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,

    /// Directory the file names are relative to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub files_dir: PathBuf,

    /// Archive format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<Format>,

    /// Compression level (0-9)
    #[arg(short = 'l', long, value_parser = parse_level)]
    pub level: Option<u32>,

    /// Output directory for the archive
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}
