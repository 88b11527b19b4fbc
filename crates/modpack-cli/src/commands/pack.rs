//! Pack command: one archive per module.

use std::path::Path;

use modpack_bundler::{BatchOptions, BatchReport, CancellationFlag, ModuleOutcome, Packager};

use crate::cli::PackArgs;
use crate::commands::utils;
use crate::config::ConfigOverrides;
use crate::error::{PackError, Result};
use crate::ui;

/// Execute the pack command.
///
/// 1. Load configuration and the module graph (fatal on error)
/// 2. Prepare the output directory
/// 3. Pack every requested module on a blocking worker, printing one report
///    line per outcome; Ctrl-C stops the batch between modules
/// 4. Print the summary
///
/// A batch tolerates per-module failures. When exactly one module was named,
/// its failure is an error; a module with nothing to pack is only reported.
pub async fn execute(args: PackArgs, config_path: Option<&Path>) -> Result<()> {
    let config = utils::load_config(&ConfigOverrides::from(&args), config_path)?;
    let backend = config.backend()?;
    let index = utils::load_index(&config)?;
    utils::prepare_output_dir(&config)?;

    let single = args.modules.len() == 1;
    let modules = (!args.modules.is_empty()).then_some(args.modules);

    println!();
    if let Some(modules) = &modules {
        println!("Compress only modules.....: {}", modules.join(", "));
    }
    for line in ui::batch_header(&config.out_dir, &backend.info()) {
        println!("{}", line);
    }
    println!();

    let cancel = CancellationFlag::new();
    let options = BatchOptions {
        max_archives: args.max_archives,
        jobs: config.jobs,
        cancel: cancel.clone(),
    };
    if options.max_archives.is_some() && options.jobs > 1 {
        tracing::debug!("max-archives given, packing sequentially");
    }

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current module");
            cancel.cancel();
        }
    });

    let modules_dir = config.modules_dir.clone();
    let out_dir = config.out_dir.clone();
    let report = tokio::task::spawn_blocking(move || {
        let packager = Packager::new(&index, modules_dir, out_dir);
        packager.run_with(modules.as_deref(), backend.as_ref(), &options, print_outcome)
    })
    .await
    .map_err(|e| PackError::Task(e.to_string()))?;

    interrupt.abort();

    println!();
    for line in ui::summary_lines(&report.stats) {
        println!("{}", line);
    }

    finish(report, single)
}

/// Report line for one outcome, on stdout.
fn print_outcome(outcome: &ModuleOutcome) {
    match outcome {
        ModuleOutcome::Packed { artifact, .. } => println!("{}", ui::module_line(artifact)),
        ModuleOutcome::Skipped { module, reason } => println!("Skip: {} ({})", module, reason),
        ModuleOutcome::Failed { module, .. } => println!(" *** ERROR! {}", module),
    }
}

fn finish(report: BatchReport, single: bool) -> Result<()> {
    if report.cancelled {
        return Err(PackError::Cancelled {
            archives: report.stats.total_archives,
        }
        .into());
    }

    if single {
        return match report.outcomes.into_iter().next() {
            Some(ModuleOutcome::Failed { module, error }) => Err(PackError::ModuleFailed {
                module,
                source: error,
            }
            .into()),
            Some(ModuleOutcome::Skipped { module, reason }) => {
                ui::warning(&format!("Nothing to pack for {}: {}", module, reason));
                Ok(())
            }
            _ => Ok(()),
        };
    }

    if report.stats.failed > 0 {
        ui::warning(&format!(
            "{} module(s) failed; see the log above for details",
            report.stats.failed
        ));
    } else {
        ui::success(&format!("{} archives written", report.stats.total_archives));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use modpack_bundler::{Error, SkipReason};

    fn report(outcomes: Vec<ModuleOutcome>, cancelled: bool) -> BatchReport {
        let mut report = BatchReport {
            cancelled,
            ..BatchReport::default()
        };
        for outcome in &outcomes {
            report.stats.record(outcome);
        }
        report.outcomes = outcomes;
        report
    }

    fn skipped(module: &str) -> ModuleOutcome {
        ModuleOutcome::Skipped {
            module: module.to_string(),
            reason: SkipReason::UnknownModule,
        }
    }

    #[test]
    fn test_single_module_skip_is_reported_only() {
        assert!(finish(report(vec![skipped("ghost")], false), true).is_ok());
    }

    #[test]
    fn test_single_module_failure_is_fatal() {
        let outcomes = vec![ModuleOutcome::Failed {
            module: "broken".to_string(),
            error: Error::InvalidOutputPath("broken".to_string()),
        }];
        match finish(report(outcomes, false), true).unwrap_err() {
            CliError::Pack(PackError::ModuleFailed { module, source }) => {
                assert_eq!(module, "broken");
                assert!(source.is_write_error());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_batch_skip_is_not_fatal() {
        let outcomes = vec![
            skipped("ghost"),
            ModuleOutcome::Failed {
                module: "broken".to_string(),
                error: Error::InvalidOutputPath("broken".to_string()),
            },
        ];
        assert!(finish(report(outcomes, false), false).is_ok());
    }

    #[test]
    fn test_cancelled_run_is_an_error() {
        let err = finish(report(vec![], true), false).unwrap_err();
        assert!(matches!(err, CliError::Pack(PackError::Cancelled { archives: 0 })));
    }
}
