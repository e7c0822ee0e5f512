//! Direct client for the remote speller's HTML form endpoint.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{Correction, Corrector, MAX_TEXT_CHARS, split_at_chars};
use crate::error::SpellCheckError;

pub const DEFAULT_UPSTREAM_URL: &str = "http://speller.cs.pusan.ac.kr/results";

// First block carrying the corrected text
static RESULT_REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<div[^>]*class="result_text"[^>]*>(.*?)</div>"#).unwrap()
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
const ERROR_MARKER: &str = r#"class="error_color""#;

/// Turn the speller's result page into a [`Correction`].
///
/// Without a result region the page carries no correction and `original`
/// comes back unchanged with zero errors.
pub fn parse_speller_html(html: &str, original: &str) -> Correction {
    let Some(region) = RESULT_REGION.captures(html).and_then(|c| c.get(1)) else {
        return Correction::unchanged(original);
    };

    let corrected = TAG
        .replace_all(region.as_str(), "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string();

    Correction {
        corrected,
        error_count: html.matches(ERROR_MARKER).count() as u32,
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamSpeller {
    client: reqwest::Client,
    url: String,
}

impl UpstreamSpeller {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SpellCheckError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Corrector for UpstreamSpeller {
    async fn correct(&self, text: &str) -> Result<Correction, SpellCheckError> {
        if text.is_empty() {
            return Err(SpellCheckError::EmptyText);
        }

        let (head, _) = split_at_chars(text, MAX_TEXT_CHARS);
        debug!("Sending {} character(s) to {}", head.chars().count(), self.url);

        let response = self
            .client
            .post(&self.url)
            .form(&[("text1", head)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpellCheckError::Status(response.status()));
        }

        let html = response.text().await?;
        Ok(parse_speller_html(&html, text))
    }
}
