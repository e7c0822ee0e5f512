use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::{ViewFormat, document::*};

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Block markup for an empty line in the editor
pub const BLANK_PARAGRAPH_HTML: &str = "<p><br></p>";

pub fn render_view(view: &EditableView, format: &ViewFormat) -> Result<String> {
    match format {
        ViewFormat::Text => Ok(render_text(view)),
        ViewFormat::Html => Ok(render_html(view)),
        ViewFormat::Json => Ok(serde_json::to_string_pretty(view)?),
    }
}

/// One `<p>` per paragraph, with blanks rendered as an explicit line break.
pub fn render_html(view: &EditableView) -> String {
    let mut output = String::new();
    for paragraph in &view.paragraphs {
        match paragraph {
            ViewParagraph::Text(text) => {
                output.push_str("<p>");
                output.push_str(&escape_html(text));
                output.push_str("</p>");
            }
            ViewParagraph::Blank => output.push_str(BLANK_PARAGRAPH_HTML),
        }
    }
    output
}

/// Read the editor's content back: every `<p>` in order, text trimmed.
pub fn parse_html(html: &str) -> EditableView {
    let fragment = Html::parse_fragment(html);
    let paragraphs = fragment
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| ViewParagraph::from_text(&p.text().collect::<String>()))
        .collect();
    EditableView::new(paragraphs)
}

/// One line per paragraph. Line breaks inside a paragraph become spaces.
pub fn render_text(view: &EditableView) -> String {
    let mut output = String::new();
    for paragraph in &view.paragraphs {
        output.push_str(&paragraph.text().replace(['\r', '\n'], " "));
        output.push('\n');
    }
    output
}

pub fn parse_text(text: &str) -> EditableView {
    EditableView::new(text.lines().map(ViewParagraph::from_text).collect())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
