use crate::builders::parts::{PartKind, SelectorPart};
use crate::builders::selector::{Combinator, SelectorBuilder};

/// Entry points for starting selector chains.
///
/// Every method returns a brand new [`SelectorBuilder`], so two chains
/// started from the same facade never share state. The facade itself holds
/// nothing.
///
/// ```
/// use selector_kit::builders::facade::CssSelectorBuilder;
///
/// let builder = CssSelectorBuilder;
/// let selector = builder.id("main").class("container")?.class("editable")?;
/// assert_eq!(builder.stringify(&selector), "#main.container.editable");
/// # Ok::<(), selector_kit::core::error::SelectorError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CssSelectorBuilder;

impl CssSelectorBuilder {
    pub fn element(&self, value: impl Into<String>) -> SelectorBuilder {
        self.start(PartKind::Element, value)
    }

    pub fn id(&self, value: impl Into<String>) -> SelectorBuilder {
        self.start(PartKind::Id, value)
    }

    pub fn class(&self, value: impl Into<String>) -> SelectorBuilder {
        self.start(PartKind::Class, value)
    }

    pub fn attr(&self, value: impl Into<String>) -> SelectorBuilder {
        self.start(PartKind::Attribute, value)
    }

    pub fn pseudo_class(&self, value: impl Into<String>) -> SelectorBuilder {
        self.start(PartKind::PseudoClass, value)
    }

    pub fn pseudo_element(&self, value: impl Into<String>) -> SelectorBuilder {
        self.start(PartKind::PseudoElement, value)
    }

    /// Joins two finished chains into a new one.
    pub fn combine(
        &self,
        left: SelectorBuilder,
        combinator: Combinator,
        right: SelectorBuilder,
    ) -> SelectorBuilder {
        SelectorBuilder::new().combine(&left, combinator, &right)
    }

    pub fn stringify(&self, builder: &SelectorBuilder) -> String {
        builder.stringify()
    }

    fn start(&self, kind: PartKind, value: impl Into<String>) -> SelectorBuilder {
        SelectorBuilder::starting_with(SelectorPart::new(kind, value))
    }
}
