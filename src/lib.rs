//! Fluent CSS selector construction plus a few small object helpers.
//!
//! ```
//! use selector_kit::{Combinator, CssSelectorBuilder};
//!
//! let builder = CssSelectorBuilder;
//! let selector = builder.combine(
//!     builder.element("p").pseudo_class("focus")?,
//!     Combinator::Child,
//!     builder.element("a").attr("href$=\".png\"")?,
//! );
//! assert_eq!(selector.stringify(), "p:focus > a[href$=\".png\"]");
//! # Ok::<(), selector_kit::SelectorError>(())
//! ```

pub mod builders;
pub mod core;
pub mod utils;

pub use crate::builders::facade::CssSelectorBuilder;
pub use crate::builders::parts::{PartKind, SelectorPart};
pub use crate::builders::selector::{Combinator, SelectorBuilder};
pub use crate::core::error::{RenderError, SelectorError};
pub use crate::core::objects::{Circle, Rectangle, Shape, ShapeKind, from_json, to_json};

#[cfg(test)]
mod tests;
