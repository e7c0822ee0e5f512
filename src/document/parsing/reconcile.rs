//! Writing edited paragraph text back into section XML
//!
//! Paragraphs are aligned by position. When the edited sequence has exactly
//! one entry per paragraph element (the shape the extractor produces), the
//! n-th entry belongs to the n-th paragraph. Otherwise the n-th entry belongs
//! to the n-th paragraph that has at least one text run. Either way,
//! paragraphs without runs are left as they are. For each aligned pair the
//! first run receives the new text and the remaining runs are emptied.
//! Nothing else in the section is touched: every other event is written back
//! from its raw bytes.
//!
//! Alignment is purely positional. If the editor added or removed paragraphs
//! the text drifts onto neighbouring paragraphs, and when fewer edited
//! paragraphs arrive than there are alignable originals, the tail keeps its
//! old text.

use std::collections::HashMap;

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::{debug, warn};

use super::super::models::SectionLayout;
use super::section::{is_text_run, scan_section};
use crate::error::{DocumentError, Result};

/// New content per text-run index. Runs absent from the plan are copied verbatim.
pub(crate) type RunPlan = HashMap<usize, String>;

/// Decide which runs change, walking paragraphs in document order.
///
/// A paragraph whose trimmed text already equals its edited text is left
/// alone so that unedited paragraphs keep their run boundaries.
pub(crate) fn plan_runs(layout: &SectionLayout, edited: &[String]) -> RunPlan {
    let mut plan = RunPlan::new();
    let mut cursor = 0;
    let one_per_paragraph = edited.len() == layout.paragraphs.len();

    for paragraph in &layout.paragraphs {
        if cursor >= edited.len() {
            break;
        }
        let Some((&first, rest)) = paragraph.runs.split_first() else {
            if one_per_paragraph {
                cursor += 1;
            }
            continue;
        };

        let new_text = edited[cursor].trim();
        cursor += 1;
        if new_text == paragraph.text {
            continue;
        }

        plan.insert(first, new_text.to_string());
        for &run in rest {
            plan.insert(run, String::new());
        }
    }

    if !one_per_paragraph && edited.len() != layout.alignable_count() {
        warn!(
            "Edited view has {} paragraphs but the section has {} text paragraphs; alignment is positional",
            edited.len(),
            layout.alignable_count()
        );
    }

    plan
}

/// Reconciler: write `edited` paragraph text into a fresh copy of `xml`.
pub fn reconcile_section(xml: &str, edited: &[String]) -> Result<String> {
    let layout = scan_section(xml)?;
    let plan = plan_runs(&layout, edited);
    debug!("Rewriting {} of {} text runs", plan.len(), layout.run_count);

    if plan.is_empty() {
        return Ok(xml.to_string());
    }
    apply_plan(xml, &plan)
}

/// Stream the section, replacing the content of the planned runs.
fn apply_plan(xml: &str, plan: &RunPlan) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));

    let mut run_index = 0;
    // Depth inside a run whose original children are being dropped
    let mut skipping: Option<usize> = None;

    loop {
        let event = reader.read_event()?;

        if let Some(depth) = skipping {
            match event {
                Event::Start(_) => skipping = Some(depth + 1),
                Event::End(_) if depth > 0 => skipping = Some(depth - 1),
                Event::End(e) => {
                    writer.write_event(Event::End(e))?;
                    skipping = None;
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) if is_text_run(e.name().as_ref()) => {
                let replacement = plan.get(&run_index);
                run_index += 1;
                writer.write_event(Event::Start(e))?;
                if let Some(text) = replacement {
                    if !text.is_empty() {
                        writer.write_event(Event::Text(BytesText::new(text)))?;
                    }
                    skipping = Some(0);
                }
            }
            Event::Empty(e) if is_text_run(e.name().as_ref()) => {
                let replacement = plan.get(&run_index);
                run_index += 1;
                match replacement {
                    Some(text) if !text.is_empty() => {
                        let end = e.to_end().into_owned();
                        writer.write_event(Event::Start(e))?;
                        writer.write_event(Event::Text(BytesText::new(text)))?;
                        writer.write_event(Event::End(end))?;
                    }
                    _ => writer.write_event(Event::Empty(e))?,
                }
            }
            Event::Eof => break,
            other => writer.write_event(other)?,
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|_| DocumentError::SectionEncoding("reconciled section".to_string()))
}
