//! Section XML parsing
//!
//! `section` reads paragraphs and text runs out of a section; `reconcile`
//! writes edited paragraph text back into it.

pub(crate) mod reconcile;
pub(crate) mod section;
