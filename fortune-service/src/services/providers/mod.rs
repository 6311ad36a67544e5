//! Text model provider abstractions and implementations.
//!
//! The fortune service only needs "prompt in, text out"; the trait keeps the
//! Gemini client swappable for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text, if the model returned any.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// How much reasoning the model may spend before answering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThinkingEffort {
    /// Leave it to the model default.
    #[default]
    Unset,
    Minimal,
    Low,
    Medium,
    High,
}

impl ThinkingEffort {
    /// Value for Gemini's `thinkingLevel`, `None` when unset.
    pub fn level(self) -> Option<&'static str> {
        match self {
            ThinkingEffort::Unset => None,
            ThinkingEffort::Minimal => Some("minimal"),
            ThinkingEffort::Low => Some("low"),
            ThinkingEffort::Medium => Some("medium"),
            ThinkingEffort::High => Some("high"),
        }
    }
}

impl fmt::Display for ThinkingEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.level().unwrap_or("unset"))
    }
}

impl FromStr for ThinkingEffort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unset" | "default" => Ok(ThinkingEffort::Unset),
            "minimal" => Ok(ThinkingEffort::Minimal),
            "low" => Ok(ThinkingEffort::Low),
            "medium" => Ok(ThinkingEffort::Medium),
            "high" => Ok(ThinkingEffort::High),
            other => Err(format!("unknown thinking effort '{}'", other)),
        }
    }
}

/// Generation parameters for a single call.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Model identifier, e.g. `gemini-3-flash-preview`.
    pub model: String,

    /// Thinking hint.
    pub thinking_effort: ThinkingEffort,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Generate a text response.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
