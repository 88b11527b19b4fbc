//! Terminal output: status messages on stderr, report formatting and a
//! spinner for slow loads.
//!
//! ```no_run
//! use modpack_cli::ui;
//!
//! ui::init_colors(false);
//! let spinner = ui::Spinner::new("Loading module index...");
//! spinner.finish("Loaded 1141 modules");
//! ui::warning("3 imports have no record");
//! ```

mod format;
mod messages;
mod spinner;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{
    batch_header, format_duration, format_size, megabytes, module_line, summary_lines,
};
pub use messages::{error, info, success, warning};
pub use spinner::Spinner;

static COLORS: AtomicBool = AtomicBool::new(false);

/// Whether status messages should be colored.
///
/// `NO_COLOR` disables colors and `FORCE_COLOR` enables them; otherwise
/// colors are used when a user is attached to stderr.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether messages are colored. Call early in `main`.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
