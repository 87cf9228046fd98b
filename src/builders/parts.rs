use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::SelectorError;

/// The six categories of a compound selector, in the order CSS requires them:
///
/// ```text
/// element#id.class[attr]:pseudoClass::pseudoElement
/// ```
///
/// The derived `Ord` follows declaration order, which is what the builder
/// compares against to reject out-of-order parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartKind {
    /// Type selector, e.g. `div`. At most one.
    Element,
    /// `#name`. At most one.
    Id,
    /// `.name`. Repeatable.
    Class,
    /// `[spec]`, where `spec` is passed through untouched. Repeatable.
    Attribute,
    /// `:name`. Repeatable.
    PseudoClass,
    /// `::name`. At most one.
    PseudoElement,
}

impl PartKind {
    /// Every kind, in selector order.
    pub const ALL: [PartKind; 6] = [
        PartKind::Element,
        PartKind::Id,
        PartKind::Class,
        PartKind::Attribute,
        PartKind::PseudoClass,
        PartKind::PseudoElement,
    ];

    /// Whether a selector may contain this kind only once.
    pub fn is_single(self) -> bool {
        matches!(
            self,
            PartKind::Element | PartKind::Id | PartKind::PseudoElement
        )
    }

    /// The text written before the value when rendering.
    pub fn prefix(self) -> &'static str {
        match self {
            PartKind::Element => "",
            PartKind::Id => "#",
            PartKind::Class => ".",
            PartKind::Attribute => "[",
            PartKind::PseudoClass => ":",
            PartKind::PseudoElement => "::",
        }
    }

    /// The text written after the value when rendering.
    pub fn suffix(self) -> &'static str {
        match self {
            PartKind::Attribute => "]",
            _ => "",
        }
    }
}

/// Implements `fmt::Display` with the same names `FromStr` accepts, so a
/// part can be written back into a sheet exactly as it was read.
impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartKind::Element => write!(f, "element"),
            PartKind::Id => write!(f, "id"),
            PartKind::Class => write!(f, "class"),
            PartKind::Attribute => write!(f, "attr"),
            PartKind::PseudoClass => write!(f, "pseudo-class"),
            PartKind::PseudoElement => write!(f, "pseudo-element"),
        }
    }
}

impl FromStr for PartKind {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "element" => Ok(PartKind::Element),
            "id" => Ok(PartKind::Id),
            "class" => Ok(PartKind::Class),
            "attr" | "attribute" => Ok(PartKind::Attribute),
            "pseudo-class" => Ok(PartKind::PseudoClass),
            "pseudo-element" => Ok(PartKind::PseudoElement),
            other => Err(SelectorError::UnknownPartKind(other.to_string())),
        }
    }
}

/// One typed fragment of a selector.
///
/// In sheets and on the command line a part is written as `kind:value`. The
/// value is everything after the first `:`, so `pseudo-class:nth-of-type(even)`
/// and `pseudo-element:first-line` keep their own punctuation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct SelectorPart {
    /// The category the value belongs to.
    pub kind: PartKind,
    /// The raw value, without the category's prefix. Never validated.
    pub value: String,
}

impl SelectorPart {
    pub fn new(kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The CSS text of this fragment alone, e.g. `.container` or `[href]`.
    pub fn to_css(&self) -> String {
        format!("{}{}{}", self.kind.prefix(), self.value, self.kind.suffix())
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

impl FromStr for SelectorPart {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind, value)) = s.split_once(':') else {
            return Err(SelectorError::MalformedPart(s.to_string()));
        };
        Ok(Self::new(kind.parse()?, value))
    }
}

impl TryFrom<String> for SelectorPart {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SelectorPart> for String {
    fn from(part: SelectorPart) -> Self {
        part.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_ordered_like_css() {
        let mut sorted = PartKind::ALL;
        sorted.sort();
        assert_eq!(sorted, PartKind::ALL);
        assert!(PartKind::Element < PartKind::PseudoElement);
        assert!(PartKind::Attribute > PartKind::Class);
    }

    #[test]
    fn test_single_kinds() {
        let single: Vec<PartKind> = PartKind::ALL
            .into_iter()
            .filter(|k| k.is_single())
            .collect();
        assert_eq!(
            single,
            vec![PartKind::Element, PartKind::Id, PartKind::PseudoElement]
        );
    }

    #[test]
    fn test_part_parsing_keeps_value_colons() {
        let part: SelectorPart = "pseudo-class:nth-of-type(even)".parse().unwrap();
        assert_eq!(part.kind, PartKind::PseudoClass);
        assert_eq!(part.value, "nth-of-type(even)");

        let part: SelectorPart = "attr:href$=\"a:b\"".parse().unwrap();
        assert_eq!(part.kind, PartKind::Attribute);
        assert_eq!(part.value, "href$=\"a:b\"");
        assert_eq!(part.to_css(), "[href$=\"a:b\"]");
    }

    #[test]
    fn test_part_parsing_errors() {
        assert_eq!(
            "main".parse::<SelectorPart>(),
            Err(SelectorError::MalformedPart("main".to_string()))
        );
        assert_eq!(
            "tag:main".parse::<SelectorPart>(),
            Err(SelectorError::UnknownPartKind("tag".to_string()))
        );
    }

    #[test]
    fn test_display_matches_from_str() {
        for kind in PartKind::ALL {
            let part = SelectorPart::new(kind, "x");
            let reparsed: SelectorPart = part.to_string().parse().unwrap();
            assert_eq!(reparsed, part);
        }
    }

    #[test]
    fn test_to_css_prefixes() {
        assert_eq!(SelectorPart::new(PartKind::Element, "div").to_css(), "div");
        assert_eq!(SelectorPart::new(PartKind::Id, "main").to_css(), "#main");
        assert_eq!(SelectorPart::new(PartKind::Class, "c").to_css(), ".c");
        assert_eq!(SelectorPart::new(PartKind::PseudoClass, "focus").to_css(), ":focus");
        assert_eq!(
            SelectorPart::new(PartKind::PseudoElement, "after").to_css(),
            "::after"
        );
    }
}
