//! Files command: pack an explicit file list into one archive.

use std::path::Path;

use modpack_bundler::pack_files;

use crate::cli::FilesArgs;
use crate::commands::utils;
use crate::config::ConfigOverrides;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the files command.
///
/// The files are taken as given, relative to `--files-dir`; nothing is
/// resolved through the module index. Any unreadable file is an error and
/// leaves no archive behind.
pub async fn execute(args: FilesArgs, config_path: Option<&Path>) -> Result<()> {
    if !args.files_dir.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--files-dir is not a directory: {}",
            args.files_dir.display()
        )));
    }

    let config = utils::load_config(&ConfigOverrides::from(&args), config_path)?;
    let backend = config.backend()?;
    utils::ensure_output_dir(&config.out_dir)?;

    println!();
    for line in ui::batch_header(&config.out_dir, &backend.info()) {
        println!("{}", line);
    }
    println!();

    let artifact = pack_files(
        backend.as_ref(),
        &config.out_dir,
        &args.name,
        &args.files_dir,
        &args.files,
    )?;

    println!("{}", ui::module_line(&artifact));
    ui::success(&format!(
        "{} written ({})",
        artifact.name,
        ui::format_size(artifact.compressed_bytes)
    ));
    Ok(())
}
