//! Client half of the `/api/fortune` contract.

use crate::error::ClientError;
use async_trait::async_trait;
use crate::models::{FortuneRequest, FortuneResponse};
use reqwest::Client;
use service_core::error::ErrorResponse;

/// Something that turns a request into fortune text.
#[async_trait]
pub trait FortuneApi: Send + Sync {
    async fn request_fortune(&self, input: &FortuneRequest) -> Result<String, ClientError>;
}

/// Talks to a fortune-service over HTTP.
pub struct HttpFortuneApi {
    client: Client,
    base_url: String,
}

impl HttpFortuneApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FortuneApi for HttpFortuneApi {
    async fn request_fortune(&self, input: &FortuneRequest) -> Result<String, ClientError> {
        let url = format!("{}/api/fortune", self.base_url);

        let response = self.client.post(&url).json(input).send().await.map_err(|e| {
            tracing::error!("Failed to send POST request to {}: {}", url, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            // The body may not be JSON (proxies, crashes); keep the raw text.
            let text = response.text().await.unwrap_or_default();
            let (error, details) = match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(body) => (body.error, body.details),
                Err(_) => (text, None),
            };

            return Err(ClientError::Server {
                status: status.as_u16(),
                error,
                details,
            });
        }

        let body: FortuneResponse = response.json().await?;
        Ok(body.fortune)
    }
}
