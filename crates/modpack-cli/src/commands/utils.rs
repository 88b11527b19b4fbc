//! Shared helpers for command implementations.

use std::fs;
use std::path::Path;

use modpack_graph::GraphIndex;

use crate::config::{ConfigOverrides, ModpackConfig};
use crate::error::{PackError, Result, ResultExt};
use crate::ui;

/// Load and validate the layered configuration.
pub fn load_config(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<ModpackConfig> {
    let config = ModpackConfig::load(overrides, config_path)?;
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Load the module graph, showing a spinner while the documents are parsed.
///
/// A malformed or missing document aborts the command before anything is
/// written.
pub fn load_index(config: &ModpackConfig) -> Result<GraphIndex> {
    let spinner = ui::Spinner::new(&format!("Reading {}", config.index_path().display()));
    match config.load_index() {
        Ok(index) => {
            spinner.finish(&format!("Loaded {} modules", index.len()));
            Ok(index)
        }
        Err(err) => {
            spinner.fail("Failed to load the module graph");
            Err(err)
        }
    }
}

/// Empty `out_dir`, creating it if it does not exist.
pub fn clean_output_dir(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        if !out_dir.is_dir() {
            return Err(PackError::OutputNotADirectory(out_dir.to_path_buf()).into());
        }

        for entry in fs::read_dir(out_dir).with_path(out_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        tracing::info!(dir = %out_dir.display(), "cleaned output directory");
    } else {
        fs::create_dir_all(out_dir)?;
    }

    Ok(())
}

/// Create `out_dir` if necessary.
pub fn ensure_output_dir(out_dir: &Path) -> Result<()> {
    if !out_dir.exists() {
        fs::create_dir_all(out_dir)?;
    } else if !out_dir.is_dir() {
        return Err(PackError::OutputNotADirectory(out_dir.to_path_buf()).into());
    }

    Ok(())
}

/// Prepare the output directory according to the `clean` setting.
pub fn prepare_output_dir(config: &ModpackConfig) -> Result<()> {
    if config.clean {
        clean_output_dir(&config.out_dir)
    } else {
        ensure_output_dir(&config.out_dir)
    }
}
