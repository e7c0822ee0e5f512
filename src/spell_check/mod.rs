//! Spell checking through a remote correction service
//!
//! A [`Corrector`] turns one paragraph into a [`Correction`]. Two are
//! provided: [`UpstreamSpeller`] talks to the remote speller directly and
//! scrapes its HTML, [`ProxyClient`] goes through the JSON endpoint served by
//! [`crate::server`]. [`check_paragraphs`] drives either over a whole view.

mod client;
mod upstream;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::document::{EditableView, ViewParagraph};
use crate::error::SpellCheckError;

pub use client::{DEFAULT_ENDPOINT, ProxyClient};
pub use upstream::{DEFAULT_UPSTREAM_URL, UpstreamSpeller, parse_speller_html};

/// Input ceiling of the remote speller, in characters.
pub const MAX_TEXT_CHARS: usize = 600;

/// Corrected text for one input, plus the number of errors the service flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub corrected: String,
    #[serde(rename = "errorCount")]
    pub error_count: u32,
}

impl Correction {
    /// The input passed through untouched.
    pub fn unchanged(text: &str) -> Self {
        Self {
            corrected: text.to_string(),
            error_count: 0,
        }
    }
}

/// Request body of `POST /api/spell-check`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpellCheckRequest {
    #[serde(default)]
    pub text: Option<String>,
}

pub trait Corrector {
    fn correct(&self, text: &str)
    -> impl Future<Output = Result<Correction, SpellCheckError>> + Send;
}

/// Outcome of checking every paragraph of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub view: EditableView,
    pub total_errors: u64,
    /// Paragraphs sent to the service
    pub checked: usize,
    /// Paragraphs kept as-is because their request failed
    pub fallbacks: usize,
}

impl CheckReport {
    pub fn summary(&self) -> String {
        let mut message = if self.total_errors > 0 {
            format!(
                "Spell check complete: corrected {} error(s) in {} paragraph(s).",
                self.total_errors, self.checked
            )
        } else {
            "Spell check complete: no errors found.".to_string()
        };
        if self.fallbacks > 0 {
            message.push_str(&format!(
                "\n{} paragraph(s) could not be checked and were left unchanged.",
                self.fallbacks
            ));
        }
        message
    }
}

/// Split `text` after at most `max_chars` characters.
pub fn split_at_chars(text: &str, max_chars: usize) -> (&str, &str) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text.split_at(byte_index),
        None => (text, ""),
    }
}

/// Check every paragraph of `view`, one request at a time, in order.
///
/// Blank paragraphs are kept without a request. Text beyond `max_chars` is
/// not sent and is appended unchanged after the corrected head, along with
/// any whitespace the head ended on. A failed request leaves its paragraph as
/// it was and counts zero errors.
pub async fn check_paragraphs<C: Corrector>(
    corrector: &C,
    view: &EditableView,
    max_chars: usize,
) -> Result<CheckReport, SpellCheckError> {
    if view.is_empty() {
        return Err(SpellCheckError::EmptyText);
    }

    let mut paragraphs = Vec::with_capacity(view.len());
    let mut total_errors = 0u64;
    let mut checked = 0;
    let mut fallbacks = 0;

    for (index, paragraph) in view.paragraphs.iter().enumerate() {
        let text = paragraph.text().trim();
        if text.is_empty() {
            paragraphs.push(ViewParagraph::Blank);
            continue;
        }

        let (head, tail) = split_at_chars(text, max_chars.max(1));
        // Corrections come back trimmed, so whitespace at the cut travels separately
        let sent = head.trim_end();
        let gap = &head[sent.len()..];
        checked += 1;
        match corrector.correct(sent).await {
            Ok(correction) => {
                debug!(
                    "Paragraph {}: {} error(s)",
                    index + 1,
                    correction.error_count
                );
                total_errors += u64::from(correction.error_count);
                let corrected = if correction.corrected.is_empty() {
                    sent
                } else {
                    correction.corrected.as_str()
                };
                paragraphs.push(ViewParagraph::from_text(&format!(
                    "{corrected}{gap}{tail}"
                )));
            }
            Err(e) => {
                warn!("Paragraph {} left unchanged: {}", index + 1, e);
                fallbacks += 1;
                paragraphs.push(ViewParagraph::Text(text.to_string()));
            }
        }
    }

    info!(
        "Checked {} paragraph(s), {} error(s), {} fallback(s)",
        checked, total_errors, fallbacks
    );

    Ok(CheckReport {
        view: EditableView::new(paragraphs),
        total_errors,
        checked,
        fallbacks,
    })
}
