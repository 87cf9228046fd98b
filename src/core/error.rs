//! Error types for selector construction and sheet rendering.

use thiserror::Error;

use crate::builders::parts::PartKind;

/// Errors raised while a selector chain is being built.
///
/// Both construction errors abort the chain: the builder that produced them
/// is consumed and never handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// A cardinality-one part (element, id, pseudo-element) was set twice.
    #[error("{0} should not occur more than one time inside the selector")]
    DuplicatePart(PartKind),

    /// A part was set after a part of a later category.
    #[error(
        "cannot add {part} after {after}: selector parts should be arranged in the following order: \
         element, id, class, attribute, pseudo-class, pseudo-element"
    )]
    Order { part: PartKind, after: PartKind },

    /// The combinator token is not one of `' '`, `'>'`, `'+'`, `'~'`.
    #[error("Unknown combinator: {0:?}")]
    UnknownCombinator(String),

    /// The `kind` half of a `kind:value` part is not a known part kind.
    #[error("Unknown selector part kind: {0}")]
    UnknownPartKind(String),

    /// A part string had no `:` separating kind and value.
    #[error("Selector part must be in format 'kind:value': {0}")]
    MalformedPart(String),
}

/// Errors raised while resolving a named selector from a sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unknown selector: {0}")]
    UnknownSelector(String),

    /// The definitions reference each other in a loop. Holds the path, with
    /// the repeated name at both ends.
    #[error("Selector reference cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    #[error("Selector '{name}' is invalid: {source}")]
    Selector {
        name: String,
        #[source]
        source: SelectorError,
    },
}
