//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Echo the prompt back inside a short markdown body.
    Echo,
    /// Always return this text.
    Reply(String),
    /// Return this text as if the token limit cut it short.
    Truncated(String),
    /// Always fail with an API error carrying this message.
    Fail(String),
}

/// Mock text provider for testing. Records every prompt it receives.
pub struct MockTextProvider {
    behavior: MockBehavior,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let (text, finish_reason) = match &self.behavior {
            MockBehavior::Echo => (
                format!("## Mock fortune\n\n> {}", prompt),
                FinishReason::Complete,
            ),
            MockBehavior::Reply(text) => (text.clone(), FinishReason::Complete),
            MockBehavior::Truncated(text) => (text.clone(), FinishReason::Length),
            MockBehavior::Fail(message) => return Err(ProviderError::ApiError(message.clone())),
        };

        Ok(ProviderResponse {
            text: Some(text),
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: 10,
            finish_reason,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
            _ => Ok(()),
        }
    }
}
