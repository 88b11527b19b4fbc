//! Check command: consistency report for the index and metadata documents.

use std::path::Path;

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::config::ConfigOverrides;
use crate::error::{ConfigError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Report
///
/// 1. Module, package, exclude, preload and missing counts
/// 2. Imports with no record that are not declared missing
/// 3. For every excluded or preloaded module with a record, the imports that
///    archives will not contain because resolution stops there
///
/// With `--strict`, undeclared unknown imports fail the command.
pub async fn execute(args: CheckArgs, config_path: Option<&Path>) -> Result<()> {
    let config = utils::load_config(&ConfigOverrides::from(&args), config_path)?;
    let index = utils::load_index(&config)?;

    let stats = index.statistics();
    println!("modules..................: {}", stats.modules);
    println!("packages.................: {}", stats.packages);
    println!("modules with a file......: {}", stats.with_file);
    println!("excluded.................: {}", stats.excluded);
    println!("preloaded................: {}", stats.preloaded);
    println!("declared missing.........: {}", stats.missing);

    let unknown = index.unknown_imports();
    if unknown.is_empty() {
        ui::success("Every import has a record or is declared missing");
    } else {
        ui::warning(&format!(
            "{} import(s) have no record and are not declared missing",
            unknown.len()
        ));
        for name in &unknown {
            println!("  unknown import: {}", name);
        }
    }

    let pruned = index.pruned_imports();
    for (skipped, imports) in &pruned {
        ui::info(&format!(
            "{} is excluded or preloaded; its imports are not bundled: {}",
            skipped,
            imports.join(", ")
        ));
    }

    if args.strict && !unknown.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "missing".to_string(),
            value: unknown.join(", "),
            hint: format!(
                "Add records for these modules or list them under \"missing\" in {}",
                config.meta_path().display()
            ),
        }
        .into());
    }

    ui::success("Check complete");
    Ok(())
}
