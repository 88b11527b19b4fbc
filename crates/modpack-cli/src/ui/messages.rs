//! Status messages on stderr.
//!
//! stdout carries the packing report, so status lines never go there.

use owo_colors::{OwoColorize, Style};

use super::colors_enabled;

#[derive(Clone, Copy)]
enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }

    fn symbol_style(self) -> Style {
        let style = Style::new().bold();
        match self {
            Self::Success => style.green(),
            Self::Info => style.blue(),
            Self::Warning => style.yellow(),
            Self::Error => style.red(),
        }
    }

    /// Warnings and errors tint the whole line.
    fn text_style(self) -> Style {
        match self {
            Self::Success | Self::Info => Style::new(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
        }
    }
}

fn render(level: Level, message: &str) -> String {
    if colors_enabled() {
        format!(
            "{} {}",
            level.symbol().style(level.symbol_style()),
            message.style(level.text_style())
        )
    } else {
        format!("{} {}", level.symbol(), message)
    }
}

pub fn success(message: &str) {
    eprintln!("{}", render(Level::Success, message));
}

pub fn info(message: &str) {
    eprintln!("{}", render(Level::Info, message));
}

pub fn warning(message: &str) {
    eprintln!("{}", render(Level::Warning, message));
}

pub fn error(message: &str) {
    eprintln!("{}", render(Level::Error, message));
}
