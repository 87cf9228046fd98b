use log::debug;
use std::collections::BTreeMap;

use crate::builders::selector::SelectorBuilder;
use crate::core::config::SelectorSheet;
use crate::core::error::RenderError;

/// Resolves named definitions in a [`SelectorSheet`] into builders.
pub struct RenderEngine<'a> {
    sheet: &'a SelectorSheet,
}

impl<'a> RenderEngine<'a> {
    pub fn new(sheet: &'a SelectorSheet) -> Self {
        Self { sheet }
    }

    pub fn build(&self, name: &str) -> Result<SelectorBuilder, RenderError> {
        let mut path = Vec::new();
        self.resolve(name, &mut path)
    }

    pub fn render(&self, name: &str) -> Result<String, RenderError> {
        self.build(name).map(|builder| builder.stringify())
    }

    pub fn render_all(&self) -> BTreeMap<String, Result<String, RenderError>> {
        self.sheet
            .selectors
            .keys()
            .map(|name| (name.clone(), self.render(name)))
            .collect()
    }

    /// `path` holds the names currently being resolved, outermost first.
    fn resolve(&self, name: &str, path: &mut Vec<String>) -> Result<SelectorBuilder, RenderError> {
        if path.iter().any(|seen| seen == name) {
            let mut cycle: Vec<String> = path
                .iter()
                .skip_while(|seen| *seen != name)
                .cloned()
                .collect();
            cycle.push(name.to_string());
            return Err(RenderError::Cycle(cycle));
        }

        let definition = self
            .sheet
            .selectors
            .get(name)
            .ok_or_else(|| RenderError::UnknownSelector(name.to_string()))?;

        path.push(name.to_string());
        let mut builder = SelectorBuilder::new();
        if let Some(combine) = &definition.combine {
            let left = self.resolve(&combine.left, path)?;
            let right = self.resolve(&combine.right, path)?;
            builder = builder.combine(&left, combine.combinator, &right);
        }
        path.pop();

        debug!("resolving {} part(s) of '{name}'", definition.parts.len());
        builder
            .extend(definition.parts.iter().cloned())
            .map_err(|source| RenderError::Selector {
                name: name.to_string(),
                source,
            })
    }
}
