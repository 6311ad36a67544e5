//! Gemini text provider.
//!
//! Calls `models/{model}:generateContent` and joins the returned text parts.
//! No request timeout is set beyond reqwest's default.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Overridable so tests can point at a local server.
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().build().map_err(|e| {
            ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.base_url.trim_end_matches('/'),
            model,
            method,
            self.config.api_key
        )
    }

    /// Build generation config from parameters.
    fn build_generation_config(params: &GenerationParams) -> Option<GenerationConfig> {
        params.thinking_effort.level().map(|level| GenerationConfig {
            thinking_config: ThinkingConfig {
                thinking_level: level.to_string(),
            },
        })
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    thought: None,
                }],
            }],
            generation_config: Self::build_generation_config(params),
        };

        let url = self.api_url(&params.model, "generateContent");

        tracing::debug!(
            model = %params.model,
            thinking_effort = %params.thinking_effort,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let candidate = api_response.candidates.first();

        let finish_reason = candidate
            .map(|c| match c.finish_reason.as_deref() {
                Some("MAX_TOKENS") => FinishReason::Length,
                Some("SAFETY") | Some("PROHIBITED_CONTENT") => FinishReason::ContentFilter,
                _ => FinishReason::Complete,
            })
            .unwrap_or(FinishReason::Complete);

        if finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered);
        }

        // Thought summaries are not part of the answer.
        let text = candidate
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought.unwrap_or(false))
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .filter(|t| !t.is_empty());

        let usage = api_response.usage_metadata.unwrap_or_default();

        Ok(ProviderResponse {
            text,
            input_tokens: usage.prompt_token_count.unwrap_or(0),
            output_tokens: usage.candidates_token_count.unwrap_or(0),
            finish_reason,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        // Try to list models to verify API key works
        let url = format!(
            "{}/models?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_level: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::ThinkingEffort;

    #[test]
    fn thinking_level_is_serialized_only_when_set() {
        let unset = GeminiTextProvider::build_generation_config(&GenerationParams::default());
        assert!(unset.is_none());

        let high = GeminiTextProvider::build_generation_config(&GenerationParams {
            model: "gemini-3-flash-preview".to_string(),
            thinking_effort: ThinkingEffort::High,
        });
        let value = serde_json::to_value(high).unwrap();
        assert_eq!(value["thinkingConfig"]["thinkingLevel"], "high");
    }

    #[test]
    fn api_url_includes_model_and_key() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:9999/".to_string(),
        })
        .unwrap();
        assert_eq!(
            provider.api_url("gemini-3-flash-preview", "generateContent"),
            "http://localhost:9999/models/gemini-3-flash-preview:generateContent?key=k"
        );
    }

    #[tokio::test]
    async fn missing_api_key_is_not_configured() {
        let provider = GeminiTextProvider::new(GeminiConfig::new("")).unwrap();
        let err = provider
            .generate("hi", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
