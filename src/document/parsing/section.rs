//! Paragraph and text-run extraction from section XML
//!
//! Paragraphs are collected in document order, nested ones included (a
//! paragraph inside a table cell is listed after the paragraph that holds the
//! table). A paragraph's text is every text run beneath it, at any depth,
//! concatenated without separators.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::super::models::*;
use crate::error::Result;

/// A text run currently being read
struct OpenRun {
    depth: usize,
    text: String,
}

pub(crate) fn is_paragraph(name: &[u8]) -> bool {
    name == PARAGRAPH_TAG
}

pub(crate) fn is_text_run(name: &[u8]) -> bool {
    name == TEXT_RUN_TAG
}

/// Walk section XML and record every paragraph with the runs it contains.
pub(crate) fn scan_section(xml: &str) -> Result<SectionLayout> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs: Vec<SectionParagraph> = Vec::new();
    let mut raw_text: Vec<String> = Vec::new();
    let mut open_paragraphs: Vec<usize> = Vec::new();
    let mut current_run: Option<OpenRun> = None;
    let mut run_count = 0;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if let Some(run) = current_run.as_mut() {
                    run.depth += 1;
                } else if is_paragraph(e.name().as_ref()) {
                    open_paragraphs.push(paragraphs.len());
                    paragraphs.push(SectionParagraph::default());
                    raw_text.push(String::new());
                } else if is_text_run(e.name().as_ref()) {
                    attach_run(&mut paragraphs, &open_paragraphs, run_count);
                    run_count += 1;
                    current_run = Some(OpenRun {
                        depth: 0,
                        text: String::new(),
                    });
                }
            }
            Event::Empty(e) => {
                if current_run.is_some() {
                    continue;
                }
                if is_paragraph(e.name().as_ref()) {
                    paragraphs.push(SectionParagraph::default());
                    raw_text.push(String::new());
                } else if is_text_run(e.name().as_ref()) {
                    attach_run(&mut paragraphs, &open_paragraphs, run_count);
                    run_count += 1;
                }
            }
            Event::End(e) => {
                if let Some(run) = current_run.as_mut() {
                    if run.depth > 0 {
                        run.depth -= 1;
                        continue;
                    }
                }
                if let Some(run) = current_run.take() {
                    for &p in &open_paragraphs {
                        raw_text[p].push_str(&run.text);
                    }
                } else if is_paragraph(e.name().as_ref()) {
                    open_paragraphs.pop();
                }
            }
            Event::Text(e) => {
                if let Some(run) = current_run.as_mut() {
                    run.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(run) = current_run.as_mut() {
                    run.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    for (paragraph, text) in paragraphs.iter_mut().zip(raw_text) {
        paragraph.text = text.trim().to_string();
    }

    Ok(SectionLayout {
        paragraphs,
        run_count,
    })
}

fn attach_run(paragraphs: &mut [SectionParagraph], open: &[usize], run_index: usize) {
    for &p in open {
        paragraphs[p].runs.push(run_index);
    }
}

/// Text Extractor: the ordered paragraph sequence of a section, blanks included.
pub fn extract_paragraphs(xml: &str) -> Result<EditableView> {
    let layout = scan_section(xml)?;
    Ok(EditableView::from(&layout))
}
