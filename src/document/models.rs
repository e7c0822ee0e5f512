//! Core data structures for the section round trip
//!
//! A loaded package yields one [`Section`] (raw XML plus its index), a
//! [`SectionLayout`] describing where its paragraphs and text runs sit, and an
//! [`EditableView`] holding the flat paragraph text handed to the editor.

use serde::{Deserialize, Serialize};

/// Number of `Contents/section<N>.xml` indices scanned when locating content.
pub const SECTION_SCAN_LIMIT: usize = 100;

/// Qualified name of a paragraph element in section XML.
pub const PARAGRAPH_TAG: &[u8] = b"hp:p";

/// Qualified name of a text-run element in section XML.
pub const TEXT_RUN_TAG: &[u8] = b"hp:t";

/// The content section selected for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub index: usize,
    pub xml: String,
}

impl Section {
    pub fn entry_name(&self) -> String {
        section_entry_name(self.index)
    }
}

pub fn section_entry_name(index: usize) -> String {
    format!("Contents/section{index}.xml")
}

/// One paragraph element of a section, in document (pre-)order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionParagraph {
    /// Trimmed concatenation of every text run inside the paragraph
    pub text: String,
    /// Indices of the paragraph's text runs, counted across the whole section
    pub runs: Vec<usize>,
}

impl SectionParagraph {
    /// Paragraphs without text runs (pure layout) take no part in alignment.
    pub fn is_alignable(&self) -> bool {
        !self.runs.is_empty()
    }
}

/// Paragraph/run structure of a section, derived from its XML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLayout {
    pub paragraphs: Vec<SectionParagraph>,
    pub run_count: usize,
}

impl SectionLayout {
    pub fn alignable_count(&self) -> usize {
        self.paragraphs.iter().filter(|p| p.is_alignable()).count()
    }
}

/// A single block of the editable view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum ViewParagraph {
    Text(String),
    Blank,
}

impl ViewParagraph {
    /// Build a block from raw text, trimming it and mapping whitespace to `Blank`.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            ViewParagraph::Blank
        } else {
            ViewParagraph::Text(trimmed.to_string())
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ViewParagraph::Text(text) => text,
            ViewParagraph::Blank => "",
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, ViewParagraph::Blank)
    }
}

/// Flat, user-editable representation of a section: one block per paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableView {
    pub paragraphs: Vec<ViewParagraph>,
}

impl EditableView {
    pub fn new(paragraphs: Vec<ViewParagraph>) -> Self {
        Self { paragraphs }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraph strings as consumed by the reconciler (blank blocks become "").
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(|p| p.text().to_string()).collect()
    }
}

impl From<&SectionLayout> for EditableView {
    fn from(layout: &SectionLayout) -> Self {
        EditableView::new(
            layout
                .paragraphs
                .iter()
                .map(|p| ViewParagraph::from_text(&p.text))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_path: String,
    pub file_size: u64,
    pub section_index: usize,
    pub paragraph_count: usize,
    pub word_count: usize,
}
