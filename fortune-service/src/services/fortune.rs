//! Fortune generation: persona choice, prompt assembly and the model call.

use crate::models::FortuneRequest;
use crate::services::metrics;
use crate::services::persona::{default_personas, PersonaSource, RandomPersona};
use crate::services::prompt::{PromptBuilder, PromptOptions};
use crate::services::providers::{
    FinishReason, GenerationParams, ProviderError, TextProvider, ThinkingEffort,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Instant;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Settings that select one of the prompt/model variants.
#[derive(Debug, Clone)]
pub struct FortuneOptions {
    pub persona_enabled: bool,
    pub tone_instruction_enabled: bool,
    pub model_id: String,
    pub thinking_effort: ThinkingEffort,
    /// Personas to pick from when `persona_enabled` is set.
    pub personas: Vec<String>,
}

impl Default for FortuneOptions {
    fn default() -> Self {
        Self {
            persona_enabled: false,
            tone_instruction_enabled: true,
            model_id: DEFAULT_MODEL.to_string(),
            thinking_effort: ThinkingEffort::Unset,
            personas: default_personas(),
        }
    }
}

/// Turns requests into model calls. Stateless between requests.
pub struct FortuneService {
    provider: Arc<dyn TextProvider>,
    persona_source: Arc<dyn PersonaSource>,
    prompt_builder: PromptBuilder,
    personas: Vec<String>,
    params: GenerationParams,
}

impl FortuneService {
    pub fn new(provider: Arc<dyn TextProvider>, options: FortuneOptions) -> Self {
        Self {
            provider,
            persona_source: Arc::new(RandomPersona),
            prompt_builder: PromptBuilder::new(PromptOptions {
                persona_enabled: options.persona_enabled,
                tone_instruction_enabled: options.tone_instruction_enabled,
            }),
            personas: options.personas,
            params: GenerationParams {
                model: options.model_id,
                thinking_effort: options.thinking_effort,
            },
        }
    }

    /// Replace the persona randomness, e.g. with a fixed persona in tests.
    pub fn with_persona_source(mut self, persona_source: Arc<dyn PersonaSource>) -> Self {
        self.persona_source = persona_source;
        self
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Build the prompt for `input`, drawing a persona at most once.
    pub fn build_prompt(&self, input: &FortuneRequest, today: NaiveDate) -> String {
        let persona = if self.prompt_builder.options().persona_enabled {
            self.persona_source.choose(&self.personas)
        } else {
            None
        };

        if let Some(persona) = &persona {
            tracing::debug!(persona = %persona, "Selected persona");
        }

        self.prompt_builder.build(input, persona.as_deref(), today)
    }

    /// Generate a fortune dated today (local time).
    pub async fn generate(&self, input: &FortuneRequest) -> Result<String, ProviderError> {
        self.generate_on(input, Local::now().date_naive()).await
    }

    /// Generate a fortune for an explicit date.
    pub async fn generate_on(
        &self,
        input: &FortuneRequest,
        today: NaiveDate,
    ) -> Result<String, ProviderError> {
        let prompt = self.build_prompt(input, today);
        let provider = self.provider.name();

        let start = Instant::now();
        let result = self.provider.generate(&prompt, &self.params).await;
        metrics::record_provider_latency(
            provider,
            &self.params.model,
            start.elapsed().as_secs_f64(),
        );

        let response = result.map_err(|e| {
            metrics::record_provider_error(provider, e.kind());
            tracing::error!(
                provider,
                model = %self.params.model,
                error = %e,
                "Text model call failed"
            );
            e
        })?;

        metrics::record_tokens(
            &self.params.model,
            response.input_tokens,
            response.output_tokens,
        );

        let text = response.text.ok_or_else(|| {
            metrics::record_provider_error(provider, ProviderError::EmptyResponse.kind());
            tracing::error!(provider, model = %self.params.model, "Text model returned no text");
            ProviderError::EmptyResponse
        })?;

        if response.finish_reason == FinishReason::Length {
            tracing::warn!(
                provider,
                model = %self.params.model,
                "Model response hit the token limit"
            );
        }

        tracing::info!(provider, model = %self.params.model, fortune = %text, "Model response");

        Ok(text)
    }
}
