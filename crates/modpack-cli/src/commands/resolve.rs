//! Resolve command: show the files a module's archive would contain.

use std::path::Path;

use modpack_bundler::SkipReason;
use modpack_graph::DependencyResolver;

use crate::cli::ResolveArgs;
use crate::commands::utils;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;

/// Execute the resolve command.
///
/// Prints the archive member list in order, one per line, or the whole
/// resolution as JSON with `--json`.
pub async fn execute(args: ResolveArgs, config_path: Option<&Path>) -> Result<()> {
    let config = utils::load_config(&ConfigOverrides::from(&args), config_path)?;
    let index = utils::load_index(&config)?;

    let resolution = DependencyResolver::new(&index).resolve(&args.module);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    if resolution.is_empty() {
        let reason = SkipReason::classify(&index, &args.module);
        ui::warning(&format!("{} resolves to no files: {}", args.module, reason));
        return Ok(());
    }

    for file in &resolution.files {
        println!("{}", file);
    }

    ui::info(&format!(
        "{} files, {} modules visited",
        resolution.file_count(),
        resolution.visited.len()
    ));
    if !resolution.skipped.is_empty() {
        ui::info(&format!(
            "Not bundled (excluded or preloaded): {}",
            resolution.skipped.join(", ")
        ));
    }

    Ok(())
}
