//! Call analysis pipeline orchestration

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::analysis::compose::compose_summary;
use crate::analysis::extract::{MarkerExtractor, ResponseExtractor};
use crate::analysis::outcome::{AnalysisError, AnalysisOutcome, CallInput};
use crate::config::{LlmSettings, Settings};
use crate::contacts::{normalize_phone, ContactStore};
use crate::llm::{build_call_prompt, build_generator, GeminiClient, TextGenerator, DEFAULT_GEMINI_MODEL};

/// Runs contact lookup, generation, extraction and composition in order.
///
/// The analyzer holds no per-call state: the contact store is loaded on every
/// call, so one analyzer can serve concurrent analyses.
pub struct CallAnalyzer {
    generator: Box<dyn TextGenerator>,
    extractor: Box<dyn ResponseExtractor>,
    phone_column: String,
}

impl CallAnalyzer {
    /// Create an analyzer with the marker extractor and the default phone column.
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            generator,
            extractor: Box::new(MarkerExtractor),
            phone_column: crate::config::ContactSettings::default().phone_column,
        }
    }

    /// Build an analyzer from runtime settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let generator = build_generator(settings)?;
        Ok(Self::new(generator).with_phone_column(settings.contacts.phone_column.clone()))
    }

    pub fn with_extractor(mut self, extractor: Box<dyn ResponseExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_phone_column(mut self, column: impl Into<String>) -> Self {
        self.phone_column = column.into();
        self
    }

    /// Analyze one call. Every failure is returned as an outcome.
    pub async fn analyze(&self, input: &CallInput) -> AnalysisOutcome {
        let outcome = AnalysisOutcome::from(self.run(input).await);

        match &outcome {
            AnalysisOutcome::Success(_) => {
                tracing::info!("Post-call summary generated for {}", input.phone_number().trim());
            }
            AnalysisOutcome::Failure(err) => {
                tracing::warn!("Call analysis failed ({}): {}", err.kind(), err);
            }
        }

        outcome
    }

    async fn run(&self, input: &CallInput) -> std::result::Result<String, AnalysisError> {
        let store = ContactStore::load(input.store_path(), &self.phone_column)
            .map_err(|e| AnalysisError::Store(e.to_string()))?;

        let contact = store
            .find_by_phone(input.phone_number())
            .ok_or_else(|| AnalysisError::NoMatch {
                phone_number: normalize_phone(input.phone_number()),
            })?;
        tracing::info!("Matched contact {}", contact.phone_number);

        let prompt = build_call_prompt(input.text());
        let response = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| AnalysisError::Service(format!("{e:#}")))?;
        tracing::debug!("Generative service response: {}", response);

        if response.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }

        let fields = self.extractor.extract(&response)?;
        Ok(compose_summary(&fields))
    }
}

/// Analyze a call against a contact store using Gemini.
///
/// The client is built from the explicit `api_key`; `model` defaults to
/// [`DEFAULT_GEMINI_MODEL`]. A client that cannot be built is reported as a
/// service failure.
pub async fn analyze_call(
    call_text: &str,
    phone_number: &str,
    store_path: &Path,
    api_key: &str,
    model: Option<&str>,
) -> AnalysisOutcome {
    let client = match GeminiClient::new(
        api_key,
        model.unwrap_or(DEFAULT_GEMINI_MODEL),
        "",
        Duration::from_secs(LlmSettings::default().timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => return AnalysisOutcome::Failure(AnalysisError::Service(format!("{e:#}"))),
    };

    CallAnalyzer::new(Box::new(client))
        .analyze(&CallInput::new(call_text, phone_number, store_path))
        .await
}
