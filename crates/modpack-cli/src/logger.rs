//! Logging setup for the modpack CLI.
//!
//! Logs go to stderr so the per-module report on stdout stays parseable.
//!
//! - `--verbose`: debug level for the modpack crates
//! - `--quiet`: errors only
//! - otherwise `RUST_LOG`, falling back to info level
//!
//! ```rust,no_run
//! use modpack_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("packing");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const VERBOSE_FILTER: &str =
    "modpack=debug,modpack_cli=debug,modpack_graph=debug,modpack_bundler=debug";
pub(crate) const QUIET_FILTER: &str = "error";
pub(crate) const DEFAULT_FILTER: &str =
    "modpack=info,modpack_cli=info,modpack_graph=info,modpack_bundler=info";

/// Initialize the global tracing subscriber.
///
/// Call once, before anything logs. `verbose` wins over `quiet`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Whether stderr output should be colored.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them even without a
/// terminal; otherwise the terminal's capabilities decide.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // tests only check that the filters parse.

    #[test]
    fn test_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }
}
