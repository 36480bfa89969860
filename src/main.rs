mod cli;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use colored::Colorize;
use geoviz::config::ConfigManager;
use geoviz::figure::{FigureKind, FigureSpec, GeoFrame, Renderer};
use geoviz::registry::{CodeRegistry, SEED_CODES};
use geoviz::table::Table;
use geoviz::{logging, options};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::Level;

fn main() {
    let args = Cli::parse();

    if let Err(e) = run(args) {
        eprintln!("geoviz: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<()> {
    logging::init(
        args.log_level,
        args.log_file.as_deref().map(|p| (p, Level::DEBUG)),
    )?;

    let registry = CodeRegistry::new(resolve_registry_path(args.registry)?);

    match args.command {
        Command::Init { force } => {
            registry.init(force)?;
            println!(
                "{}",
                format!(
                    "Created {} with {} seed entries.",
                    registry.path().display(),
                    SEED_CODES.len()
                )
                .green()
            );
        }
        Command::List => {
            let codes = logging::timed("registry load", || registry.load())?;
            for (name, code) in &codes {
                println!("{} {}", code.bold(), name);
            }
        }
        Command::Add { country, code } => {
            registry.add(&country, &code)?;
            println!("{}", format!("Added {}:{}.", code, country).green());
        }
        Command::Remove { code } => {
            registry.remove(&code)?;
            println!("{}", format!("Removed {}.", code).green());
        }
        Command::Render { data, options } => {
            render_dry_run(&registry, &data, &options)?;
        }
    }

    Ok(())
}

fn resolve_registry_path(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    match cli_override {
        Some(path) => Ok(path),
        None => Ok(ConfigManager::new()?.registry_path()),
    }
}

fn render_dry_run(registry: &CodeRegistry, data: &Path, raw_options: &str) -> Result<()> {
    let content = std::fs::read_to_string(data)
        .with_context(|| format!("Failed to read data file {}", data.display()))?;
    let records: Vec<serde_json::Map<String, Value>> =
        serde_json::from_str(&content).context("Data file must be a JSON array of objects")?;

    let parsed: Value =
        serde_json::from_str(raw_options).context("Options must be a JSON object")?;
    let opts: options::Options = parsed
        .as_object()
        .cloned()
        .ok_or_else(|| anyhow!("Options must be a JSON object"))?;

    let frame = logging::timed("figure assembly", || {
        GeoFrame::new(Table::from_records(&records), registry)
    })?;
    frame.display(FigureKind::Choropleth, opts, &TextRenderer)
}

/// Dry-run renderer: prints what the real plotting collaborator would be
/// handed instead of drawing anything.
struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, table: &Table, spec: &FigureSpec) -> Result<()> {
        println!(
            "{}",
            format!("{:?} request over {} rows", spec.kind, table.row_count())
                .bold()
                .blue()
        );
        println!("{}", "Display options:".bold());
        println!("{}", serde_json::to_string_pretty(&spec.display)?);
        println!("{}", "Update options:".bold());
        println!("{}", serde_json::to_string_pretty(&spec.update)?);
        Ok(())
    }
}
