//! Spinner for tasks without known duration.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

use super::colors_enabled;

/// Spinner on stderr; hidden automatically when stderr is not a terminal.
///
/// ```no_run
/// use modpack_cli::ui::Spinner;
///
/// let spinner = Spinner::new("Loading module index...");
/// spinner.finish("Loaded 1141 modules");
/// ```
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Finish with a check mark.
    pub fn finish(&self, message: &str) {
        self.finish_with("✓".green().to_string(), "✓", message);
    }

    /// Finish with a cross.
    pub fn fail(&self, message: &str) {
        self.finish_with("✗".red().to_string(), "✗", message);
    }

    fn finish_with(&self, colored: String, plain: &str, message: &str) {
        let mark = if colors_enabled() { colored } else { plain.to_string() };
        self.pb.finish_with_message(format!("{mark} {message}"));
    }
}
