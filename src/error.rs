//! Error types shared by the document round trip and the spell-check proxy.

use thiserror::Error;

/// Failures while loading, reconciling or saving a `.hwpx` package.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(
        "Legacy .hwp files are not supported.\n\
        Re-save the document as .hwpx (File > Save As) and try again."
    )]
    LegacyFormat,

    #[error("Unsupported file type: .{0} (expected .hwpx)")]
    UnsupportedFormat(String),

    #[error("Document content not found: no Contents/section<N>.xml entry in the package")]
    ContentNotFound,

    #[error("Section {0} is not valid UTF-8")]
    SectionEncoding(String),

    #[error("Malformed section XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid .hwpx package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures of a single spell-check request.
///
/// These never abort a document-wide check; the paragraph driver falls back
/// to the original text instead.
#[derive(Debug, Error)]
pub enum SpellCheckError {
    #[error("No text to check")]
    EmptyText,

    #[error("Spell-check request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Spell-check service answered {0}")]
    Status(reqwest::StatusCode),

    #[error("Unreadable spell-check response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
