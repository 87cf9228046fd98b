use anyhow::{Context, Result};
use colored::Colorize;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::builders::importer::{FileImporter, SelectorImporter};
use crate::builders::parts::SelectorPart;
use crate::builders::reporter::{ConsoleReporter, SheetReporter};
use crate::builders::selector::{Combinator, SelectorBuilder};
use crate::builders::validator::{SheetValidator, StandardValidator};
use crate::core::engine::RenderEngine;

/// File name used when no `--config` path is given.
pub const DEFAULT_SHEET_FILE: &str = "selectors.toml";

pub const SHEET_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "toml" => Ok(ExportFormat::Toml),
            _ => anyhow::bail!("Invalid export format: {}", s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SheetSettings {
    pub verbose: bool,
    pub pretty_json: bool,
    pub export_format: ExportFormat,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            pretty_json: true,
            export_format: ExportFormat::Json,
        }
    }
}

/// Two named selectors joined by a combinator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CombineDefinition {
    pub left: String,
    pub combinator: Combinator,
    pub right: String,
}

/// One named selector in a sheet. When `combine` is present it is rendered
/// first, then `parts` are applied on top in order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct SelectorDefinition {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<SelectorPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine: Option<CombineDefinition>,
}

impl SelectorDefinition {
    pub fn from_parts(parts: Vec<SelectorPart>) -> Self {
        Self {
            parts,
            combine: None,
        }
    }

    pub fn combination(left: String, combinator: Combinator, right: String) -> Self {
        Self {
            parts: Vec::new(),
            combine: Some(CombineDefinition {
                left,
                combinator,
                right,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SelectorSheet {
    pub version: String,
    #[serde(default)]
    pub settings: SheetSettings,
    #[serde(default)]
    pub selectors: BTreeMap<String, SelectorDefinition>,
}

impl Default for SelectorSheet {
    fn default() -> Self {
        Self {
            version: SHEET_VERSION.to_string(),
            settings: SheetSettings::default(),
            selectors: BTreeMap::new(),
        }
    }
}

impl SelectorSheet {
    /// The sheet written by `init`: a few selectors showing each feature.
    pub fn sample() -> Self {
        let mut sheet = Self::default();
        let parts = |specs: &[&str]| -> Vec<SelectorPart> {
            specs.iter().filter_map(|s| s.parse().ok()).collect()
        };

        sheet.selectors.insert(
            "main".to_string(),
            SelectorDefinition::from_parts(parts(&[
                "id:main",
                "class:container",
                "class:editable",
            ])),
        );
        sheet.selectors.insert(
            "image-link".to_string(),
            SelectorDefinition::from_parts(parts(&[
                "element:a",
                "attr:href$=\".png\"",
                "pseudo-class:focus",
            ])),
        );
        sheet.selectors.insert(
            "main-link".to_string(),
            SelectorDefinition::combination(
                "main".to_string(),
                Combinator::Child,
                "image-link".to_string(),
            ),
        );
        sheet
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// A manager for `selectors.toml` in the current directory.
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to read current directory")?;
        Self::new_at(current_dir.join(DEFAULT_SHEET_FILE))
    }

    pub fn new_at(config_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            config_path: config_path.into(),
        })
    }

    /// Writes the sample sheet unless one already exists.
    pub fn initialize(&self) -> Result<()> {
        if self.config_path.exists() {
            return Ok(());
        }

        self.save_config(&SelectorSheet::sample())?;
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        let config = self.load_config()?;
        let validator = StandardValidator::new();
        let issues = validator.validate_config(&config)?;

        if issues.is_empty() {
            println!("{}", "✓ Selector sheet is valid.".green());
            Ok(())
        } else {
            println!("{}", "⚠️  Found issues in selector sheet:".yellow());
            for issue in issues {
                println!("  - {issue}");
            }
            anyhow::bail!("Selector sheet validation failed.");
        }
    }

    /// Stores a parts definition, refusing parts that would not build.
    pub fn add_selector(&mut self, name: String, parts: Vec<SelectorPart>) -> Result<()> {
        SelectorBuilder::new()
            .extend(parts.iter().cloned())
            .with_context(|| format!("Selector '{name}' is invalid"))?;

        let mut config = self.load_config()?;
        config
            .selectors
            .insert(name, SelectorDefinition::from_parts(parts));
        self.save_config(&config)
    }

    /// Stores a combination. Missing references are refused, and so is a
    /// definition that would not render once stored, e.g. one that refers
    /// back to its own name.
    pub fn add_combination(
        &mut self,
        name: String,
        left: String,
        combinator: Combinator,
        right: String,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        for reference in [&left, &right] {
            if !config.selectors.contains_key(reference) {
                anyhow::bail!("Unknown selector: {}", reference);
            }
        }

        config.selectors.insert(
            name.clone(),
            SelectorDefinition::combination(left, combinator, right),
        );
        ensure_renders(&config, [name.as_str()])?;
        self.save_config(&config)
    }

    /// Deletes a definition and returns the names of the combinations that
    /// still refer to it. Those are kept but no longer render.
    pub fn remove_selector(&mut self, name: &str) -> Result<Vec<String>> {
        let mut config = self.load_config()?;
        if config.selectors.remove(name).is_none() {
            anyhow::bail!("Unknown selector: {}", name);
        }

        let dangling = referrers(&config, name);
        if !dangling.is_empty() {
            warn!("'{name}' is still referenced by {}", dangling.join(", "));
        }
        self.save_config(&config)?;
        Ok(dangling)
    }

    pub fn render_selector(&self, name: &str) -> Result<String> {
        let config = self.load_config()?;
        let rendered = RenderEngine::new(&config).render(name)?;
        Ok(rendered)
    }

    pub fn list_selectors(&self, verbose: bool) -> Result<()> {
        let mut config = self.load_config()?;
        config.settings.verbose |= verbose;
        let rendered = RenderEngine::new(&config).render_all();
        ConsoleReporter::new().generate_report(&config, &rendered)
    }

    pub fn import_selectors(&mut self, file_path: &str, import_type: &str) -> Result<usize> {
        let mut importer = FileImporter::new();
        let selectors = importer.import_from_file(file_path, import_type)?;
        let count = selectors.len();
        let names: Vec<String> = selectors.keys().cloned().collect();

        let mut config = self.load_config()?;
        config.selectors.extend(selectors);
        ensure_renders(&config, names.iter().map(String::as_str))
            .with_context(|| format!("Nothing imported from {file_path}"))?;

        self.save_config(&config)?;
        Ok(count)
    }

    /// Writes every selector that renders, keyed by name. Selectors that
    /// fail to render are skipped and reported in the returned list.
    pub fn export_selectors(
        &self,
        file_path: &str,
        format: Option<ExportFormat>,
    ) -> Result<Vec<String>> {
        let config = self.load_config()?;
        let mut rendered = BTreeMap::new();
        let mut skipped = Vec::new();
        for (name, result) in RenderEngine::new(&config).render_all() {
            match result {
                Ok(selector) => {
                    rendered.insert(name, selector);
                }
                Err(e) => skipped.push(format!("{name}: {e}")),
            }
        }

        let content = match format.unwrap_or(config.settings.export_format) {
            ExportFormat::Json if config.settings.pretty_json => {
                serde_json::to_string_pretty(&rendered).context("Failed to serialize to JSON")?
            }
            ExportFormat::Json => {
                serde_json::to_string(&rendered).context("Failed to serialize to JSON")?
            }
            ExportFormat::Yaml => {
                serde_yaml::to_string(&rendered).context("Failed to serialize to YAML")?
            }
            ExportFormat::Toml => {
                toml::to_string_pretty(&rendered).context("Failed to serialize to TOML")?
            }
        };

        fs::write(file_path, content).context("Failed to write export file")?;
        Ok(skipped)
    }
}

/// Fails on the first of `names` that does not render against `config`.
fn ensure_renders<'a>(
    config: &SelectorSheet,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let engine = RenderEngine::new(config);
    for name in names {
        engine
            .render(name)
            .with_context(|| format!("Selector '{name}' would not render"))?;
    }
    Ok(())
}

/// Names of the combinations whose `left` or `right` is `name`.
fn referrers(config: &SelectorSheet, name: &str) -> Vec<String> {
    config
        .selectors
        .iter()
        .filter(|(_, definition)| {
            definition
                .combine
                .as_ref()
                .is_some_and(|combine| combine.left == name || combine.right == name)
        })
        .map(|(referrer, _)| referrer.clone())
        .collect()
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<SelectorSheet>;
    fn save_config(&self, config: &SelectorSheet) -> Result<()>;
    fn get_config_path(&self) -> Result<PathBuf>;
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<SelectorSheet> {
        if !self.config_path.exists() {
            return Ok(SelectorSheet::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read selector sheet")?;

        toml::from_str(&content).context("Failed to parse selector sheet")
    }

    fn save_config(&self, config: &SelectorSheet) -> Result<()> {
        let content =
            toml::to_string_pretty(config).context("Failed to serialize selector sheet")?;

        fs::write(&self.config_path, content).context("Failed to write selector sheet")?;
        info!(
            "saved {} selector(s) to {}",
            config.selectors.len(),
            self.config_path.display()
        );

        Ok(())
    }

    fn get_config_path(&self) -> Result<PathBuf> {
        Ok(self.config_path.clone())
    }
}
