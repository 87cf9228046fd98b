use anyhow::Result;
use std::collections::HashSet;

use crate::builders::parts::SelectorPart;
use crate::core::config::{self, SelectorDefinition};
use crate::core::engine::RenderEngine;

/// The `SheetValidator` trait defines the public interface for validating a
/// selector sheet.
pub trait SheetValidator {
    /// Performs a full validation of the `SelectorSheet` and returns the list
    /// of issues found. An empty list means the sheet is valid.
    fn validate_config(&self, config: &config::SelectorSheet) -> Result<Vec<String>>;

    /// Checks a single definition on its own, without resolving references.
    fn validate_definition(&self, name: &str, definition: &SelectorDefinition) -> Vec<String>;
}

/// Checks version, resolvability of every selector, and a few shapes that
/// are legal but almost certainly mistakes. Value syntax is never checked.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Finds parts that appear more than once with the same value, e.g. the
    /// same class listed twice.
    fn check_repeated_parts(&self, parts: &[SelectorPart]) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for part in parts {
            if !seen.insert((part.kind, part.value.as_str())) {
                warnings.push(format!("Repeated part '{part}'"));
            }
        }
        warnings
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetValidator for StandardValidator {
    fn validate_config(&self, config: &config::SelectorSheet) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != config::SHEET_VERSION {
            issues.push(format!("Unsupported sheet version: {}", config.version));
        }

        let engine = RenderEngine::new(config);
        for (name, definition) in &config.selectors {
            issues.extend(self.validate_definition(name, definition));

            match engine.build(name) {
                Ok(builder) if builder.is_empty() => {
                    issues.push(format!("Selector '{name}' has no parts"));
                }
                Ok(_) => {}
                Err(e) => issues.push(e.to_string()),
            }
        }

        Ok(issues)
    }

    fn validate_definition(&self, name: &str, definition: &SelectorDefinition) -> Vec<String> {
        self.check_repeated_parts(&definition.parts)
            .into_iter()
            .map(|warning| format!("Selector '{name}': {warning}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::selector::Combinator;
    use crate::core::config::SelectorSheet;

    fn parts(specs: &[&str]) -> SelectorDefinition {
        SelectorDefinition::from_parts(specs.iter().map(|s| s.parse().unwrap()).collect())
    }

    #[test]
    fn test_sample_sheet_is_valid() {
        let issues = StandardValidator::new()
            .validate_config(&SelectorSheet::sample())
            .unwrap();
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_reports_every_kind_of_issue() {
        let mut sheet = SelectorSheet::default();
        sheet.version = "2.0".to_string();
        sheet
            .selectors
            .insert("twice".to_string(), parts(&["class:a", "class:a"]));
        sheet
            .selectors
            .insert("backwards".to_string(), parts(&["class:a", "element:div"]));
        sheet
            .selectors
            .insert("empty".to_string(), SelectorDefinition::default());
        sheet.selectors.insert(
            "dangling".to_string(),
            SelectorDefinition::combination(
                "twice".to_string(),
                Combinator::Descendant,
                "nowhere".to_string(),
            ),
        );

        let issues = StandardValidator::new().validate_config(&sheet).unwrap();
        assert_eq!(issues.len(), 5, "{issues:?}");
        assert!(issues.iter().any(|i| i.contains("Unsupported sheet version")));
        assert!(issues.iter().any(|i| i.contains("Repeated part 'class:a'")));
        assert!(issues.iter().any(|i| i.contains("'backwards' is invalid")));
        assert!(issues.iter().any(|i| i.contains("'empty' has no parts")));
        assert!(issues.iter().any(|i| i.contains("Unknown selector: nowhere")));
    }
}
