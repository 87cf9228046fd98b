use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;

use crate::builders::parts::SelectorPart;
use crate::core::config::SelectorDefinition;

/// A trait that defines the behavior for importing selector definitions
/// from an external source.
pub trait SelectorImporter {
    /// Imports definitions from a file.
    ///
    /// # Arguments
    /// * `file_path`: The path to the file to be imported.
    /// * `import_type`: The format to parse (`custom`, `json`, `yaml`, `toml`).
    ///
    /// # Returns
    /// A map of selector name to definition, ready to be merged into a sheet.
    fn import_from_file(
        &mut self,
        file_path: &str,
        import_type: &str,
    ) -> Result<BTreeMap<String, SelectorDefinition>>;
}

/// Reads definitions from files on disk.
pub struct FileImporter;

impl SelectorImporter for FileImporter {
    fn import_from_file(
        &mut self,
        file_path: &str,
        import_type: &str,
    ) -> Result<BTreeMap<String, SelectorDefinition>> {
        let content = fs::read_to_string(file_path).context("Failed to read import file")?;
        self.parse(&content, import_type)
    }
}

impl FileImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parses already-loaded content in the given format.
    pub fn parse(
        &self,
        content: &str,
        import_type: &str,
    ) -> Result<BTreeMap<String, SelectorDefinition>> {
        match import_type {
            "json" => serde_json::from_str(content).context("Failed to parse JSON selectors"),
            "yaml" | "yml" => {
                serde_yaml::from_str(content).context("Failed to parse YAML selectors")
            }
            "toml" => toml::from_str(content).context("Failed to parse TOML selectors"),
            "custom" => self.parse_custom_format(content),
            other => anyhow::bail!("Invalid import format: {}", other),
        }
    }

    /// Parses the INI-like custom format:
    ///
    /// ```text
    /// # comment
    /// [image-link]
    /// element:a
    /// attr:href$=".png"
    /// ```
    ///
    /// A section with no part lines still produces an (empty) definition.
    fn parse_custom_format(&self, content: &str) -> Result<BTreeMap<String, SelectorDefinition>> {
        let mut result: BTreeMap<String, SelectorDefinition> = BTreeMap::new();
        let mut current: Option<String> = None;

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_string();
                result.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(name) = &current else {
                anyhow::bail!("Line {}: part outside of a [selector] section", index + 1);
            };
            let part: SelectorPart = line
                .parse()
                .with_context(|| format!("Line {}: invalid part '{line}'", index + 1))?;
            result.entry(name.clone()).or_default().parts.push(part);
        }

        Ok(result)
    }
}

impl Default for FileImporter {
    fn default() -> Self {
        Self::new()
    }
}
