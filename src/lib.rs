//! hwpx-spell: spell-check the body text of .hwpx documents
//!
//! This library extracts the paragraphs of a `.hwpx` package into a flat
//! editable view, corrects them through a remote speller, and writes the
//! result back without disturbing the package's layout, images or other
//! entries.

pub mod config;
pub mod document;
pub mod error;
pub mod server;
pub mod spell_check;
pub mod view;

/// Editable view output formats
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum ViewFormat {
    /// One line per paragraph
    Text,
    /// One `<p>` block per paragraph, as handed to a rich-text editor
    Html,
    Json,
}

// Re-export commonly used types
pub use config::Config;
pub use document::{EditableView, Session, ViewParagraph};
pub use error::{DocumentError, SpellCheckError};
pub use spell_check::{CheckReport, Correction, Corrector, ProxyClient, UpstreamSpeller};
