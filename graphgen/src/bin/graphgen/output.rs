use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color as TableColor, Table, presets};
use serde::Serialize;
use std::io::Write;

use crate::theme::{Tone, labelled};

/// How command results are printed
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Tables for reading
    #[default]
    Table,
    /// The model as JSON on stdout
    Json,
    /// One line per entity or field
    Compact,
}

#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// A command result renderable as tables or compact lines; JSON comes from serde
pub trait TableDisplay {
    fn to_tables(&self, output: &OutputManager) -> Vec<Table>;
    fn to_compact(&self) -> String;
}

pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    pub fn is_json(&self) -> bool {
        self.options.output_format == OutputFormat::Json
    }

    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Table => {
                for table in data.to_tables(self) {
                    println!("{table}");
                }
            }
            OutputFormat::Compact => println!("{}", data.to_compact()),
        }
        Ok(())
    }

    pub fn success(&self, message: &str) {
        self.status(Tone::Done, message);
    }

    pub fn warning(&self, message: &str) {
        self.status(Tone::Caution, message);
    }

    pub fn info(&self, message: &str) {
        self.status(Tone::Note, message);
    }

    /// Goes to stderr, and only with `--verbose`
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", Tone::Quiet.line(message, self.options.no_color));
        }
    }

    pub fn key_value(&self, key: &str, value: &str) {
        if !self.suppress_status() {
            println!("{}", labelled(key, value, self.options.no_color));
        }
    }

    pub fn bullet(&self, text: &str) {
        if !self.suppress_status() {
            println!("  {}", Tone::Quiet.line(text, self.options.no_color));
        }
    }

    pub fn create_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(if self.options.no_color {
            presets::ASCII_FULL
        } else {
            presets::UTF8_FULL_CONDENSED
        });

        table.set_header(headers.iter().map(|h| {
            let cell = Cell::new(h).add_attribute(Attribute::Bold);
            if self.options.no_color { cell } else { cell.fg(TableColor::Cyan) }
        }));
        table
    }

    /// Transient "working" line, erased by `clear_line`
    pub fn progress(&self, message: &str) {
        if !self.suppress_status() {
            print!("\r{}...", Tone::Note.line(message, self.options.no_color));
            std::io::stdout().flush().ok();
        }
    }

    pub fn clear_line(&self) {
        if !self.suppress_status() {
            print!("\r{:80}\r", "");
            std::io::stdout().flush().ok();
        }
    }

    fn status(&self, tone: Tone, message: &str) {
        if !self.suppress_status() {
            println!("{}", tone.line(message, self.options.no_color));
        }
    }

    // Status lines would corrupt JSON on stdout
    fn suppress_status(&self) -> bool {
        self.options.quiet || self.is_json()
    }
}
