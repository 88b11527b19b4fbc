//! modpack - package module sources into per-module archives.
//!
//! Entry point: parses arguments, initialises logging and dispatches to the
//! selected command.

use clap::Parser;
use miette::Result;
use modpack_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config = args.config.as_deref();
    let result = match args.command {
        cli::Command::Pack(pack_args) => commands::pack_execute(pack_args, config).await,
        cli::Command::Snapshot(snapshot_args) => {
            commands::snapshot_execute(snapshot_args, config).await
        }
        cli::Command::Resolve(resolve_args) => {
            commands::resolve_execute(resolve_args, config).await
        }
        cli::Command::Check(check_args) => commands::check_execute(check_args, config).await,
        cli::Command::Files(files_args) => commands::files_execute(files_args, config).await,
        cli::Command::Schema => commands::schema_execute().await,
    };

    result.map_err(error::cli_error_to_miette)
}
