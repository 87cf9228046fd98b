use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;

use crate::core::config::{SelectorDefinition, SelectorSheet};
use crate::core::error::RenderError;

pub trait SheetReporter {
    fn generate_report(
        &self,
        config: &SelectorSheet,
        rendered: &BTreeMap<String, Result<String, RenderError>>,
    ) -> Result<()>;
}

/// Prints the sheet to the console, one line per selector.
///
/// This is the reporter used by the `list` command.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Formats the line for one selector: a status icon, the name, and the
    /// rendered text or the error that prevented rendering.
    fn format_selector_line(
        &self,
        name: &str,
        definition: &SelectorDefinition,
        result: Option<&Result<String, RenderError>>,
    ) -> String {
        let kind = if definition.combine.is_some() {
            "combination".to_string()
        } else {
            format!("{} parts", definition.parts.len())
        };

        match result {
            Some(Ok(selector)) => format!(
                "🟢 {} ({}): {}",
                name.bold(),
                kind,
                selector.bright_green()
            ),
            Some(Err(e)) => format!("🔴 {} ({}): {}", name.bold(), kind, e.to_string().red()),
            None => format!("⚠️  {name} (not rendered)"),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetReporter for ConsoleReporter {
    fn generate_report(
        &self,
        config: &SelectorSheet,
        rendered: &BTreeMap<String, Result<String, RenderError>>,
    ) -> Result<()> {
        println!("{}", "🎨 Selector Sheet Report".cyan().bold());
        println!("========================");

        if config.selectors.is_empty() {
            println!("No selectors defined.");
            return Ok(());
        }

        let mut combinations = 0;
        let mut failures = 0;

        for (name, definition) in &config.selectors {
            if definition.combine.is_some() {
                combinations += 1;
            }
            let result = rendered.get(name);
            if matches!(result, Some(Err(_)) | None) {
                failures += 1;
            }

            println!("{}", self.format_selector_line(name, definition, result));

            if config.settings.verbose {
                if let Some(combine) = &definition.combine {
                    println!(
                        "  └─ combine: {} '{}' {}",
                        combine.left, combine.combinator, combine.right
                    );
                }
                for part in &definition.parts {
                    println!("  └─ {part}");
                }
            }
        }

        println!("\n📈 Summary:");
        println!("  Total selectors: {}", config.selectors.len());
        println!("  Combinations: {combinations}");
        println!("  Failed to render: {failures}");

        if failures > 0 {
            println!("\n⚠️  Run 'selector-kit validate' for details");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::RenderEngine;

    #[test]
    fn test_report_handles_empty_and_sample_sheets() {
        let reporter = ConsoleReporter::new();
        let empty = SelectorSheet::default();
        reporter.generate_report(&empty, &BTreeMap::new()).unwrap();

        let mut sample = SelectorSheet::sample();
        sample.settings.verbose = true;
        let rendered = RenderEngine::new(&sample).render_all();
        reporter.generate_report(&sample, &rendered).unwrap();
    }

    #[test]
    fn test_format_selector_line() {
        let reporter = ConsoleReporter::new();
        let definition = SelectorDefinition::default();
        let line = reporter.format_selector_line(
            "gone",
            &definition,
            Some(&Err(RenderError::UnknownSelector("gone".to_string()))),
        );
        assert!(line.contains("0 parts"));
        assert!(line.contains("Unknown selector: gone"));
        assert!(reporter.format_selector_line("x", &definition, None).contains("not rendered"));
    }
}
