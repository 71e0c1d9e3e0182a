use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use graphgen::{Diagnostic, Entity, Field, Package};

use crate::context::ProjectContext;
use crate::output::{OutputManager, TableDisplay};
use crate::theme::Tone;

pub const EXAMPLES: &str = "\
Examples:
  graphgen inspect                        Entities of the current crate
  graphgen inspect ../movies --warnings   Another crate, with diagnostics
  graphgen inspect --entity Film          Field table for Film
  graphgen --output json inspect -e Film  One entity as JSON";

#[derive(Args)]
pub struct InspectArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Show the fields of a single entity
    #[arg(short = 'e', long)]
    pub entity: Option<String>,

    /// Report skipped types and ignored directives
    #[arg(short = 'w', long)]
    pub warnings: bool,
}

pub fn handle_inspect(args: InspectArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::locate(args.path.as_deref())?;
    let config = ctx.load_config()?;
    output.verbose(&format!("Project root: {}", ctx.project_root.display()));
    if !ctx.is_initialized() {
        output.verbose("No graphgen.toml found, using default conventions");
    }

    output.progress("Scanning sources");
    let (package, diagnostics) = graphgen::build_project_with(&ctx.project_root, &config)
        .with_context(|| format!("Failed to build model for {}", ctx.project_root.display()))?;
    output.clear_line();

    if args.warnings || config.diagnostics.warn {
        for diagnostic in &diagnostics {
            output.warning(&diagnostic.to_string());
        }
    } else if !diagnostics.is_empty() {
        output.verbose(&format!(
            "{} diagnostic(s) suppressed, pass --warnings to show them",
            diagnostics.len()
        ));
    }

    match args.entity {
        Some(name) => output.display(&EntityReport {
            entity: find_entity(&package, &name)?,
        }),
        None => {
            output.success(&format!(
                "Built package '{}' with {} entit{}",
                package.name,
                package.entities.len(),
                if package.entities.len() == 1 { "y" } else { "ies" }
            ));
            output.display(&PackageReport {
                package: &package,
                diagnostics: &diagnostics,
            })
        }
    }
}

fn find_entity<'a>(package: &'a Package, name: &str) -> Result<&'a Entity> {
    package.entity(name).ok_or_else(|| {
        let known = package.entity_names();
        if known.is_empty() {
            anyhow!("Entity '{name}' not found, package '{}' has no entities", package.name)
        } else {
            anyhow!("Entity '{name}' not found in package '{}' (known: {})", package.name, known.join(", "))
        }
    })
}

#[derive(Serialize)]
struct PackageReport<'a> {
    package: &'a Package,
    diagnostics: &'a [Diagnostic],
}

impl TableDisplay for PackageReport<'_> {
    fn to_tables(&self, output: &OutputManager) -> Vec<Table> {
        let mut table = output.create_table(&["Entity", "Fields", "Edges", "Search Field", "Source"]);

        for entity in &self.package.entities {
            table.add_row(vec![
                Cell::new(&entity.name),
                Cell::new(entity.fields.len()),
                Cell::new(entity.edges().count()),
                Cell::new(if entity.searchable { entity.search_field.as_str() } else { "-" }),
                Cell::new(
                    entity
                        .location
                        .as_ref()
                        .map(|loc| format!("{}:{}", loc.file.display(), loc.line))
                        .unwrap_or_default(),
                ),
            ]);
        }

        vec![table]
    }

    fn to_compact(&self) -> String {
        format!(
            "{}: {} entities, {} searchable, {} diagnostics",
            self.package.name,
            self.package.entities.len(),
            self.package.searchable_entities().count(),
            self.diagnostics.len()
        )
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct EntityReport<'a> {
    entity: &'a Entity,
}

impl TableDisplay for EntityReport<'_> {
    fn to_tables(&self, output: &OutputManager) -> Vec<Table> {
        let mut table = output.create_table(&["Field", "Type", "Predicate", "Indexes", "Edge", "Flags"]);

        for field in &self.entity.fields {
            table.add_row(vec![
                Cell::new(&field.name),
                Cell::new(field.type_name.to_string()),
                Cell::new(&field.predicate),
                Cell::new(field.indexes.join(",")),
                Cell::new(field.edge_entity.as_deref().unwrap_or("")),
                Cell::new(field_flags(field, self.entity)),
            ]);
        }

        vec![table]
    }

    fn to_compact(&self) -> String {
        let edges: Vec<&str> = self.entity.edges().map(|f| f.predicate.as_str()).collect();
        format!(
            "{}: {} fields, edges [{}], search {}",
            self.entity.name,
            self.entity.fields.len(),
            edges.join(" "),
            if self.entity.searchable { self.entity.search_field.as_str() } else { "none" }
        )
    }
}

fn field_flags(field: &Field, entity: &Entity) -> String {
    let mut flags = Vec::new();
    if field.is_uid {
        flags.push("uid".to_string());
    }
    if field.is_dtype {
        flags.push("dtype".to_string());
    }
    if field.is_reverse {
        flags.push("reverse".to_string());
    }
    if field.has_count {
        flags.push("count".to_string());
    }
    if field.upsert {
        flags.push("upsert".to_string());
    }
    if field.omit_empty {
        flags.push("omitempty".to_string());
    }
    if let Some(hint) = &field.type_hint {
        flags.push(format!("type={hint}"));
    }
    if entity.searchable && entity.search_field == field.name {
        flags.push(format!("{} search", Tone::Search.marker()));
    }
    flags.join(" ")
}
