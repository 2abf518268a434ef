//! Generated product copy.
//!
//! The admin form can ask a text model for a short product description, and
//! the admin listing can ask for a one-line order summary. Both calls are best
//! effort: any failure turns into a fixed fallback string and is never retried.

use crate::{
    config::settings::Settings,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{instrument, warn};

/// Used when the model call fails
pub const DESCRIPTION_FALLBACK: &str = "High-quality product for your tech needs.";
/// Used when the model answers with nothing
pub const DESCRIPTION_EMPTY: &str = "Automatically generated description.";
/// Used when the summary call fails
pub const SUMMARY_FALLBACK: &str = "New order detected.";
/// Used when the summary comes back empty
pub const SUMMARY_EMPTY: &str = "Order received.";

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Anything that turns a prompt into text.
pub trait DescriptionGenerator: Send + Sync {
    /// Completes `prompt`. An empty string is a valid (if useless) answer.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Short marketing description for a product, or a fallback.
#[instrument(skip(generator))]
pub async fn describe_product<G: DescriptionGenerator>(
    generator: &G,
    product_name: &str,
    category_name: &str,
) -> String {
    let prompt = format!(
        "Write a short, attractive, minimalist description of an electronics product \
         called \"{product_name}\" in the \"{category_name}\" category. 150 characters maximum."
    );
    complete_or(generator, &prompt, DESCRIPTION_EMPTY, DESCRIPTION_FALLBACK).await
}

/// One-line admin summary of an order, or a fallback.
#[instrument(skip_all)]
pub async fn summarize_order<G: DescriptionGenerator>(generator: &G, order_details: &str) -> String {
    let prompt = format!(
        "Summarize this store order in a single informative line for an admin panel: \
         {order_details}"
    );
    complete_or(generator, &prompt, SUMMARY_EMPTY, SUMMARY_FALLBACK).await
}

async fn complete_or<G: DescriptionGenerator>(
    generator: &G,
    prompt: &str,
    empty: &str,
    fallback: &str,
) -> String {
    match generator.complete(prompt).await {
        Ok(text) if text.trim().is_empty() => empty.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Text generation failed: {e}");
            fallback.to_string()
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client for `model` authenticated with `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Builds a client from settings, `None` if no API key is configured.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        settings
            .gemini_api_key
            .as_ref()
            .map(|key| Self::new(key.clone(), settings.gemini_model.clone()))
    }
}

impl DescriptionGenerator for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.into_text())
    }
}
