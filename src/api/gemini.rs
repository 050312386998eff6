//! Implements the `Analyst` trait using the Gemini `generateContent` REST endpoint.

use crate::analysis::AnalysisRequest;
use crate::api::Analyst;
use crate::Result;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Sends each request as a single `generateContent` call. No retries, no streaming.
pub struct GeminiAnalyst {
    endpoint: Url,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiAnalyst {
    /// `endpoint` is the API base, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Unable to create the HTTP client")?;
        Ok(Self::with_client(endpoint, api_key, client))
    }

    pub(crate) fn with_client(
        endpoint: Url,
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint,
            api_key: api_key.into(),
            client,
        }
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.endpoint.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl Analyst for GeminiAnalyst {
    async fn generate(&mut self, request: &AnalysisRequest) -> Result<String> {
        let url = self.url(&request.model);
        trace!("generateContent at {url}");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .context("Failed to send the analysis request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!("Analysis request failed with status {}: {}", status, body);
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse the analysis response")?;
        Ok(response.text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> From<&'a AnalysisRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a AnalysisRequest) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// The concatenated text parts of the first candidate. Empty if there are none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
