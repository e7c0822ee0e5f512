//! Client for the JSON spell-check endpoint.

use std::time::Duration;

use serde::Deserialize;

use super::{Correction, Corrector, SpellCheckRequest};
use crate::error::SpellCheckError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/spell-check";

/// Lenient view of the endpoint's answer; absent fields fall back to the input.
#[derive(Debug, Deserialize)]
struct EndpointResponse {
    #[serde(default)]
    corrected: Option<String>,
    #[serde(default, rename = "errorCount")]
    error_count: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SpellCheckError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Corrector for ProxyClient {
    async fn correct(&self, text: &str) -> Result<Correction, SpellCheckError> {
        let request = SpellCheckRequest {
            text: Some(text.to_string()),
        };
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(SpellCheckError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        let body: EndpointResponse = serde_json::from_slice(&bytes)?;
        Ok(Correction {
            corrected: body
                .corrected
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| text.to_string()),
            error_count: body.error_count.unwrap_or(0),
        })
    }
}
