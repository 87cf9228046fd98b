use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::builders::parts::SelectorPart;
use crate::builders::selector::{Combinator, SelectorBuilder};
use crate::core::config::{ConfigManager, ConfigProvider, ExportFormat};
use crate::core::objects::{Rectangle, ShapeKind, to_json};

pub fn initialize_sheet(config: Option<PathBuf>) -> Result<()> {
    let config_manager = get_config_manager(config)?;
    config_manager.initialize()?;
    println!(
        "✓ Initialized selector sheet at {}",
        config_manager.get_config_path()?.display()
    );
    println!("Run 'selector-kit list' to see the sample selectors");
    Ok(())
}

/// Parses `kind:value` arguments and builds them in the order given.
pub fn render_parts(parts: &[String]) -> Result<()> {
    let selector = build_from_args(parts)?;
    println!("{}", selector.stringify());
    Ok(())
}

pub fn show_selector(config: Option<PathBuf>, name: &str) -> Result<()> {
    let config_manager = get_config_manager(config)?;
    println!("{}", config_manager.render_selector(name)?);
    Ok(())
}

pub fn add_selector(config: Option<PathBuf>, name: String, parts: &[String]) -> Result<()> {
    let parsed = parse_parts(parts)?;
    let mut config_manager = get_config_manager(config)?;
    config_manager.add_selector(name.clone(), parsed)?;
    println!("✓ Added selector '{name}'");
    Ok(())
}

pub fn add_combination(
    config: Option<PathBuf>,
    name: String,
    left: String,
    combinator: &str,
    right: String,
) -> Result<()> {
    let combinator: Combinator = combinator.parse()?;
    let mut config_manager = get_config_manager(config)?;
    config_manager.add_combination(name.clone(), left, combinator, right)?;
    println!("✓ Added combination '{name}'");
    Ok(())
}

pub fn remove_selector(config: Option<PathBuf>, name: &str) -> Result<()> {
    let mut config_manager = get_config_manager(config)?;
    let dangling = config_manager.remove_selector(name)?;
    println!("✓ Removed selector '{name}'");
    for referrer in dangling {
        println!(
            "{} '{referrer}' still refers to '{name}' and will not render",
            "  warning:".yellow()
        );
    }
    Ok(())
}

pub fn list_selectors(config: Option<PathBuf>, verbose: bool) -> Result<()> {
    get_config_manager(config)?.list_selectors(verbose)
}

pub fn validate_sheet(config: Option<PathBuf>) -> Result<()> {
    get_config_manager(config)?.validate_config()
}

pub fn export_selectors(
    config: Option<PathBuf>,
    file_path: &str,
    format: Option<&str>,
) -> Result<()> {
    let format = format.map(str::parse::<ExportFormat>).transpose()?;
    let skipped = get_config_manager(config)?.export_selectors(file_path, format)?;
    println!("✓ Exported selectors to {file_path}");
    for entry in skipped {
        println!("{} {entry}", "  skipped:".yellow());
    }
    Ok(())
}

pub fn import_selectors(config: Option<PathBuf>, file_path: &str, format: &str) -> Result<()> {
    let mut config_manager = get_config_manager(config)?;
    let count = config_manager.import_selectors(file_path, format)?;
    println!("✓ Imported {count} selector(s) from {file_path}");
    Ok(())
}

pub fn print_rectangle(width: f64, height: f64) -> Result<()> {
    let rectangle = Rectangle::new(width, height);
    println!("width:  {}", rectangle.width);
    println!("height: {}", rectangle.height);
    println!("area:   {}", rectangle.area());
    println!("json:   {}", to_json(&rectangle).context("Failed to encode rectangle")?);
    Ok(())
}

pub fn print_shape(kind: &str, json: &str) -> Result<()> {
    let kind: ShapeKind = kind.parse()?;
    let shape = kind.decode(json).context("Failed to parse shape JSON")?;
    println!("{}: area {}", shape.name(), shape.area());
    Ok(())
}

/// Whether the sheet asks for verbose output. A missing or unreadable sheet
/// counts as not verbose; the command itself will report the problem.
pub fn sheet_is_verbose(config: Option<PathBuf>) -> bool {
    get_config_manager(config)
        .and_then(|manager| manager.load_config())
        .map(|sheet| sheet.settings.verbose)
        .unwrap_or(false)
}

fn build_from_args(parts: &[String]) -> Result<SelectorBuilder> {
    let parsed = parse_parts(parts)?;
    let selector = SelectorBuilder::new().extend(parsed)?;
    Ok(selector)
}

fn parse_parts(parts: &[String]) -> Result<Vec<SelectorPart>> {
    parts
        .iter()
        .map(|part| {
            part.parse::<SelectorPart>()
                .with_context(|| format!("Invalid selector part '{part}'"))
        })
        .collect()
}

// Helper function to create ConfigManager instance
fn get_config_manager(config: Option<PathBuf>) -> Result<ConfigManager> {
    match config {
        Some(path) => ConfigManager::new_at(path),
        None => ConfigManager::new(),
    }
}
