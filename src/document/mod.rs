//! Document loading, extraction and reconciliation
//!
//! This module opens `.hwpx` packages, turns their first content section into
//! a flat paragraph sequence, and writes edited paragraphs back into the
//! original structure.

pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub(crate) mod parsing;

pub use io::Package;
pub use loader::Session;
pub use models::*;
pub use parsing::reconcile::reconcile_section;
pub use parsing::section::extract_paragraphs;
