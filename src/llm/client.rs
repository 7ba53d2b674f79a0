use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;

/// A generative text service: one prompt in, free-form text out.
///
/// Implementations return the raw generated text, which may be empty. They
/// must not retry on their own.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build a text generator from runtime settings.
pub fn build_generator(settings: &Settings) -> Result<Box<dyn TextGenerator>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }
}
