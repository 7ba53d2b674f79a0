use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Settings;
use crate::llm::client::TextGenerator;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Build a client with explicit credentials. Blank model or endpoint
    /// fall back to the public defaults.
    pub fn new(api_key: &str, model: &str, endpoint: &str, timeout: Duration) -> Result<Self> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!(
                "Gemini API key is missing. Set llm.api_key in config or CALLBRIEF_GEMINI_API_KEY."
            );
        }

        let model = if model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            model.trim().to_string()
        };

        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            endpoint.trim().trim_end_matches('/').to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build Gemini HTTP client")?,
            api_key,
            model,
            endpoint,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.llm.api_key,
            &settings.llm.model,
            &settings.llm.endpoint,
            Duration::from_secs(settings.llm.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!("Sending prompt to Gemini model {}", self.model);

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let response = response
            .error_for_status()
            .context("Gemini returned an error status")?;

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        // Only the first candidate is used; its parts are joined in order.
        let text = payload
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GeminiGenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContentResponse,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}
