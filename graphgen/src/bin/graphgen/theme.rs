//! Terminal styling for the graphgen CLI.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use colored::{Color, Colorize};

/// What a line of CLI output reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// A model was built or a file written
    Done,
    /// A diagnostic or a refused overwrite
    Caution,
    Note,
    /// Verbose detail, bullets
    Quiet,
    /// The inferred search field of an entity
    Search,
}

impl Tone {
    pub fn marker(self) -> &'static str {
        match self {
            Tone::Done => "✓",
            Tone::Caution => "⚠",
            Tone::Note => "ℹ",
            Tone::Quiet => "→",
            Tone::Search => "✓",
        }
    }

    fn color(self) -> Color {
        match self {
            Tone::Done | Tone::Search => Color::Green,
            Tone::Caution => Color::Yellow,
            Tone::Note => Color::Blue,
            Tone::Quiet => Color::BrightBlack,
        }
    }

    /// `marker text`, colored unless `plain`
    pub fn line(self, text: &str, plain: bool) -> String {
        if plain {
            format!("{} {text}", self.marker())
        } else {
            format!("{} {}", self.marker().color(self.color()), text.color(self.color()))
        }
    }
}

/// A `key: value` pair, key in bold cyan
pub fn labelled(key: &str, value: &str, plain: bool) -> String {
    if plain {
        format!("{key}: {value}")
    } else {
        format!("{}: {value}", key.bright_cyan().bold())
    }
}

/// Help styling, matching the colors of `Tone`
pub fn help_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::BrightBlack.on_default())
        .error(AnsiColor::Red.on_default().bold())
}
