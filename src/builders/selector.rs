use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::builders::parts::{PartKind, SelectorPart};
use crate::core::error::SelectorError;

/// The CSS combinators that can join two selectors.
///
/// The token is rendered verbatim with one space on each side, so the
/// descendant combinator produces three spaces between its operands.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum Combinator {
    /// `' '`
    Descendant,
    /// `'>'`
    Child,
    /// `'+'`
    NextSibling,
    /// `'~'`
    SubsequentSibling,
}

impl Combinator {
    /// The token as it appears in the rendered selector.
    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::NextSibling => "+",
            Combinator::SubsequentSibling => "~",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the raw tokens and their names. The raw descendant token is a
/// single space and must not be trimmed away.
impl FromStr for Combinator {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            " " | "descendant" => Ok(Combinator::Descendant),
            ">" | "child" => Ok(Combinator::Child),
            "+" | "next-sibling" => Ok(Combinator::NextSibling),
            "~" | "subsequent-sibling" => Ok(Combinator::SubsequentSibling),
            other => Err(SelectorError::UnknownCombinator(other.to_string())),
        }
    }
}

impl TryFrom<String> for Combinator {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Combinator> for String {
    fn from(combinator: Combinator) -> Self {
        combinator.as_str().to_string()
    }
}

/// Accumulates the parts of one selector chain and renders them in CSS order:
///
/// ```text
/// element#id.class[attr]:pseudoClass::pseudoElement
/// ```
///
/// Every setter consumes the builder and hands it back on success, so a chain
/// reads `builder.id("main")?.class("container")?`. A setter fails when its
/// part would land before a part that is already present, or when a
/// cardinality-one part is set a second time.
///
/// ```
/// use selector_kit::builders::selector::SelectorBuilder;
///
/// let selector = SelectorBuilder::new()
///     .element("a")?
///     .attr("href$=\".png\"")?
///     .pseudo_class("focus")?;
/// assert_eq!(selector.stringify(), "a[href$=\".png\"]:focus");
/// # Ok::<(), selector_kit::core::error::SelectorError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorBuilder {
    element: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<String>,
    pseudo_classes: Vec<String>,
    pseudo_element: Option<String>,
    /// Text rendered by `combine`, written before this builder's own parts.
    combined: Option<String>,
    /// The latest category written so far.
    highest: Option<PartKind>,
}

impl SelectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder holding a single part. Cannot fail since nothing precedes it.
    pub fn starting_with(part: SelectorPart) -> Self {
        let mut builder = Self::new();
        builder.record(part);
        builder
    }

    pub fn element(self, name: impl Into<String>) -> Result<Self, SelectorError> {
        self.push(SelectorPart::new(PartKind::Element, name))
    }

    pub fn id(self, name: impl Into<String>) -> Result<Self, SelectorError> {
        self.push(SelectorPart::new(PartKind::Id, name))
    }

    pub fn class(self, name: impl Into<String>) -> Result<Self, SelectorError> {
        self.push(SelectorPart::new(PartKind::Class, name))
    }

    /// Adds `[spec]`. The spec is opaque, e.g. `href$=".png"`.
    pub fn attr(self, spec: impl Into<String>) -> Result<Self, SelectorError> {
        self.push(SelectorPart::new(PartKind::Attribute, spec))
    }

    pub fn pseudo_class(self, name: impl Into<String>) -> Result<Self, SelectorError> {
        self.push(SelectorPart::new(PartKind::PseudoClass, name))
    }

    pub fn pseudo_element(self, name: impl Into<String>) -> Result<Self, SelectorError> {
        self.push(SelectorPart::new(PartKind::PseudoElement, name))
    }

    /// Adds any part, enforcing cardinality first and then ordering.
    pub fn push(mut self, part: SelectorPart) -> Result<Self, SelectorError> {
        self.check(part.kind)?;
        self.record(part);
        Ok(self)
    }

    /// Adds parts in sequence, stopping at the first rejected one.
    pub fn extend<I>(self, parts: I) -> Result<Self, SelectorError>
    where
        I: IntoIterator<Item = SelectorPart>,
    {
        parts.into_iter().try_fold(self, SelectorBuilder::push)
    }

    /// Renders `left`, `combinator` and `right` into this builder's prefix.
    ///
    /// Combining the same builder again appends to the prefix.
    pub fn combine(
        mut self,
        left: &SelectorBuilder,
        combinator: Combinator,
        right: &SelectorBuilder,
    ) -> Self {
        let rendered = format!("{} {} {}", left.stringify(), combinator, right.stringify());
        debug!("combined selector: {rendered:?}");
        self.combined
            .get_or_insert_with(String::new)
            .push_str(&rendered);
        self
    }

    /// Renders the selector. Pure, so repeated calls give identical results.
    pub fn stringify(&self) -> String {
        let mut out = self.combined.clone().unwrap_or_default();
        for part in self.parts() {
            out.push_str(&part.to_css());
        }
        out
    }

    /// The builder's own parts in render order, without the combined prefix.
    pub fn parts(&self) -> Vec<SelectorPart> {
        PartKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.values(kind)
                    .iter()
                    .map(move |value| SelectorPart::new(kind, value.as_str()))
            })
            .collect()
    }

    /// Whether anything has been written, parts or combined prefix.
    pub fn is_empty(&self) -> bool {
        self.highest.is_none() && self.combined.is_none()
    }

    fn check(&self, kind: PartKind) -> Result<(), SelectorError> {
        if kind.is_single() && !self.values(kind).is_empty() {
            warn!("rejected duplicate {kind} part");
            return Err(SelectorError::DuplicatePart(kind));
        }
        if let Some(after) = self.highest
            && after > kind
        {
            warn!("rejected {kind} part after {after}");
            return Err(SelectorError::Order { part: kind, after });
        }
        Ok(())
    }

    fn values(&self, kind: PartKind) -> &[String] {
        match kind {
            PartKind::Element => self.element.as_slice(),
            PartKind::Id => self.id.as_slice(),
            PartKind::Class => &self.classes,
            PartKind::Attribute => &self.attributes,
            PartKind::PseudoClass => &self.pseudo_classes,
            PartKind::PseudoElement => self.pseudo_element.as_slice(),
        }
    }

    fn record(&mut self, part: SelectorPart) {
        debug!("selector part accepted: {part}");
        let SelectorPart { kind, value } = part;
        match kind {
            PartKind::Element => self.element = Some(value),
            PartKind::Id => self.id = Some(value),
            PartKind::Class => self.classes.push(value),
            PartKind::Attribute => self.attributes.push(value),
            PartKind::PseudoClass => self.pseudo_classes.push(value),
            PartKind::PseudoElement => self.pseudo_element = Some(value),
        }
        self.highest = self.highest.max(Some(kind));
    }
}

impl fmt::Display for SelectorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}
