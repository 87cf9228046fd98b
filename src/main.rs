//! selector-kit:
//! Build CSS selector strings from typed parts, keep named selectors in a
//! TOML sheet, and poke at the small JSON object helpers from the command
//! line. Parts are written as `kind:value`, e.g. `element:a`, `class:nav`,
//! `attr:href$=".png"`, `pseudo-class:hover`, `pseudo-element:after`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use selector_kit::utils;

#[derive(Parser)]
#[command(name = "selector-kit")]
#[command(about = "Build CSS selectors from ordered parts")]
struct Cli {
    /// Path to the selector sheet (defaults to ./selectors.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log builder activity and list parts in reports
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a selector sheet with sample selectors
    Init,
    /// Build a selector from parts, in the order given
    Render {
        #[arg(required = true)]
        parts: Vec<String>,
    },
    /// Render a named selector from the sheet
    Show { name: String },
    /// Add a named selector built from parts
    Add {
        name: String,
        #[arg(required = true)]
        parts: Vec<String>,
    },
    /// Add a named selector combining two others (combinator: ' ', '>', '+', '~')
    Combine {
        name: String,
        left: String,
        combinator: String,
        right: String,
    },
    /// Remove a named selector
    Remove { name: String },
    /// Show every selector in the sheet
    List,
    /// Check the sheet for selectors that cannot be rendered
    Validate,
    /// Export rendered selectors
    Export {
        file: String,
        /// json, yaml or toml (defaults to the sheet setting)
        #[arg(long)]
        format: Option<String>,
    },
    /// Import selector definitions
    Import {
        file: String,
        /// custom, json, yaml or toml
        #[arg(long, default_value = "custom")]
        format: String,
    },
    /// Print a rectangle, its area and its JSON form
    Area { width: f64, height: f64 },
    /// Decode JSON as a shape (rectangle or circle) and print its area
    Shape { kind: String, json: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = cli.verbose || utils::sheet_is_verbose(cli.config.clone());
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let config = cli.config;
    match cli.command {
        Commands::Init => utils::initialize_sheet(config),
        Commands::Render { parts } => utils::render_parts(&parts),
        Commands::Show { name } => utils::show_selector(config, &name),
        Commands::Add { name, parts } => utils::add_selector(config, name, &parts),
        Commands::Combine {
            name,
            left,
            combinator,
            right,
        } => utils::add_combination(config, name, left, &combinator, right),
        Commands::Remove { name } => utils::remove_selector(config, &name),
        Commands::List => utils::list_selectors(config, verbose),
        Commands::Validate => utils::validate_sheet(config),
        Commands::Export { file, format } => {
            utils::export_selectors(config, &file, format.as_deref())
        }
        Commands::Import { file, format } => utils::import_selectors(config, &file, &format),
        Commands::Area { width, height } => utils::print_rectangle(width, height),
        Commands::Shape { kind, json } => utils::print_shape(&kind, &json),
    }
}
