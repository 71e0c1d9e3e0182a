use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use graphgen::GraphgenConfig;

use crate::context::ProjectContext;
use crate::output::OutputManager;

pub const EXAMPLES: &str = "\
Examples:
  graphgen init           Write graphgen.toml with default conventions
  graphgen init --force   Replace an existing or broken graphgen.toml";

#[derive(Args)]
pub struct InitArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Overwrite an existing graphgen.toml
    #[arg(long)]
    pub force: bool,
}

pub fn handle_init(args: InitArgs, output: &OutputManager) -> Result<()> {
    // The existing file is never parsed, so --force also repairs a malformed one
    let ctx = ProjectContext::locate(args.path.as_deref())?;

    if ctx.is_initialized() && !args.force {
        output.warning(&format!("{} already exists", ctx.config_path.display()));
        output.info("Use --force to overwrite it with the defaults.");
        return Ok(());
    }

    let config = GraphgenConfig::default();
    let content = config.to_toml().context("Failed to serialize default configuration")?;
    std::fs::write(&ctx.config_path, content)
        .with_context(|| format!("Failed to write {}", ctx.config_path.display()))?;

    output.success(&format!("Created {}", ctx.config_path.display()));
    output.key_value("Source directories", &config.scan.dirs.join(", "));
    output.key_value("Identity field", &config.conventions.uid_field);
    output.key_value("Type-marker field", &config.conventions.dtype_field);
    output.key_value("Directive attribute", &format!("#[{}(\"...\")]", config.conventions.schema_attribute));
    output.bullet("Run 'graphgen inspect' to view the package model.");

    Ok(())
}
