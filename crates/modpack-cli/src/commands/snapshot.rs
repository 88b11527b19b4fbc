//! Snapshot command: one JSON document per module.

use std::path::Path;

use modpack_bundler::{JsonSnapshotPacker, ModuleOutcome};

use crate::cli::SnapshotArgs;
use crate::commands::utils;
use crate::config::ConfigOverrides;
use crate::error::{PackError, Result};
use crate::ui;

/// Execute the snapshot command.
///
/// Modules without files are reported and skipped. As with `pack`, naming a
/// single module makes its failure an error; a skip is never one.
pub async fn execute(args: SnapshotArgs, config_path: Option<&Path>) -> Result<()> {
    let config = utils::load_config(&ConfigOverrides::from(&args), config_path)?;
    let index = utils::load_index(&config)?;
    utils::ensure_output_dir(&config.out_dir)?;

    let packer = JsonSnapshotPacker::new(&index, &config.modules_dir, &config.out_dir);
    let outcomes = packer.pack_modules(&args.modules);

    let mut written = 0;
    for outcome in &outcomes {
        match outcome {
            ModuleOutcome::Packed { artifact, .. } => {
                written += 1;
                println!(
                    "{} written, size: {} Bytes",
                    artifact.path.display(),
                    artifact.compressed_bytes
                );
            }
            ModuleOutcome::Skipped { module, reason } => {
                ui::warning(&format!("Skip: {} because {}", module, reason));
            }
            ModuleOutcome::Failed { module, error } => {
                ui::error(&format!("{}: {}", module, error));
            }
        }
    }

    if outcomes.len() == 1 {
        if let Some(ModuleOutcome::Failed { module, error }) = outcomes.into_iter().next() {
            return Err(PackError::ModuleFailed {
                module,
                source: error,
            }
            .into());
        }
        return Ok(());
    }

    ui::success(&format!("{} of {} snapshots written", written, outcomes.len()));
    Ok(())
}
