//! Conversion of CLI errors into miette reports.

use miette::Report;

use crate::error::{CliError, PackError};

/// Convert a [`CliError`] into a miette report for display by `main`.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Graph(e) => miette::miette!(
            help = "Check --modules-dir and the indexFile / metaFile settings",
            "{}",
            e
        ),
        CliError::Bundler(e) if e.is_write_error() => miette::miette!(
            help = "Check that the output directory is writable and the module sources are intact",
            "{}",
            e
        ),
        CliError::Pack(PackError::ModuleFailed { module, source }) => miette::miette!(
            help = format!("Run `modpack resolve {module}` to inspect the resolved file list"),
            "Module '{}' was not packaged: {}",
            module,
            source
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("no modules".to_string()));
        assert_eq!(report.to_string(), "Invalid argument: no modules");
    }

    #[test]
    fn test_module_failure_has_help() {
        let report = cli_error_to_miette(CliError::Pack(PackError::ModuleFailed {
            module: "time".to_string(),
            source: modpack_bundler::Error::InvalidOutputPath("../time".to_string()),
        }));
        assert!(report.to_string().contains("'time'"));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("modpack resolve time"));
    }
}
