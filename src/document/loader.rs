//! Session orchestration
//!
//! A [`Session`] owns everything a load produces: the pristine package, the
//! selected content section and the live editable view. Saving always
//! reconciles against the section as it was loaded, never against a
//! previously saved copy.

use std::path::Path;

use tracing::{debug, info};

use super::io::{Package, validate_hwpx_file};
use super::models::*;
use super::parsing::reconcile::reconcile_section;
use super::parsing::section::extract_paragraphs;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Session {
    package: Package,
    section: Section,
    view: EditableView,
    metadata: DocumentMetadata,
}

impl Session {
    /// Load a `.hwpx` file from disk.
    ///
    /// This function:
    /// 1. Validates the file extension
    /// 2. Opens the ZIP package
    /// 3. Locates the first `Contents/section<N>.xml`
    /// 4. Extracts its paragraphs into an editable view
    pub async fn load(file_path: &Path) -> Result<Self> {
        validate_hwpx_file(file_path)?;

        let bytes = tokio::fs::read(file_path).await?;
        let mut session = Self::from_bytes(bytes)?;
        session.metadata.file_path = file_path.display().to_string();

        info!(
            "Loaded {} (section {}, {} paragraphs)",
            session.metadata.file_path, session.section.index, session.metadata.paragraph_count
        );
        Ok(session)
    }

    /// Build a session from package bytes already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let file_size = bytes.len() as u64;
        let package = Package::from_bytes(bytes)?;
        let section = package.find_section()?;
        let view = extract_paragraphs(&section.xml)?;

        let word_count = view
            .paragraphs
            .iter()
            .map(|p| p.text().split_whitespace().count())
            .sum();

        let metadata = DocumentMetadata {
            file_path: String::new(),
            file_size,
            section_index: section.index,
            paragraph_count: view.len(),
            word_count,
        };

        Ok(Self {
            package,
            section,
            view,
            metadata,
        })
    }

    pub fn view(&self) -> &EditableView {
        &self.view
    }

    /// Replace the live view wholesale, e.g. with the editor's current content.
    pub fn set_view(&mut self, view: EditableView) {
        if view.len() != self.view.len() {
            debug!(
                "Editable view changed from {} to {} paragraphs",
                self.view.len(),
                view.len()
            );
        }
        self.view = view;
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Reconcile the live view into the original section and serialize the package.
    ///
    /// The session is not modified, so a failed save can simply be retried.
    pub fn save(&self) -> Result<Vec<u8>> {
        let updated = reconcile_section(&self.section.xml, &self.view.paragraph_texts())?;
        self.package
            .replace_entry(&self.section.entry_name(), updated.as_bytes())
    }

    /// Save to `output_path`.
    pub async fn save_to(&self, output_path: &Path) -> Result<()> {
        let bytes = self.save()?;
        tokio::fs::write(output_path, &bytes).await?;
        info!("Saved {} ({} bytes)", output_path.display(), bytes.len());
        Ok(())
    }
}
