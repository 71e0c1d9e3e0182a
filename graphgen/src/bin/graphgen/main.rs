mod commands;
mod context;
mod output;
mod theme;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    init::{self, InitArgs, handle_init},
    inspect::{self, InspectArgs, handle_inspect},
};
use output::{GlobalOptions, OutputFormat, OutputManager};

const ENVIRONMENT: &str = "\
Environment:
  RUST_LOG   Scanner and builder logging, e.g. RUST_LOG=graphgen=debug
  NO_COLOR   Disable colored output

Run 'graphgen <command> --help' for examples.";

/// Build the graph model of a crate whose structs carry #[dgraph("...")] directives
#[derive(Parser)]
#[command(name = "graphgen", version)]
#[command(
    long_about = "Reads structs annotated with #[dgraph(\"...\")] directives and builds the package \
                  model consumed by code generators: entities with UID and DType fields, edges with \
                  reverse and count flags, index lists and inferred full-text search fields."
)]
#[command(styles = theme::help_styles(), after_long_help = ENVIRONMENT)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Only print errors
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Print scan details to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the package model and display its entities
    #[command(after_long_help = inspect::EXAMPLES)]
    Inspect(InspectArgs),

    /// Write graphgen.toml with the default conventions
    #[command(after_long_help = init::EXAMPLES)]
    Init(InitArgs),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = execute(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    match cli.command {
        Commands::Inspect(args) => handle_inspect(args, &output),
        Commands::Init(args) => handle_init(args, &output),
    }
}
