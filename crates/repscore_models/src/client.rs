//! OpenAI Responses API client.

use crate::{ProviderConfig, ResponsesDriver, ResponsesRequest};
use async_trait::async_trait;
use repscore_error::{ConfigError, ProviderError, ProviderErrorKind, RepscoreResult};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument};

/// HTTP client for the Responses API.
#[derive(Debug, Clone)]
pub struct ResponsesClient {
    client: Client,
    config: ProviderConfig,
}

impl ResponsesClient {
    /// Create a new client from provider settings.
    #[instrument(skip(config), fields(base_url = %config.base_url(), model = %config.model()))]
    pub fn new(config: ProviderConfig) -> Self {
        debug!(has_api_key = config.has_api_key(), "Creating responses client");
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Get the provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn api_key(&self) -> RepscoreResult<&str> {
        match self.config.api_key().as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::missing_env("OPENAI_API_KEY").into()),
        }
    }
}

/// Pull `error.message` out of a provider error body, or fall back to the raw body.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")?
                .get("message")?
                .as_str()
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ResponsesDriver for ResponsesClient {
    #[instrument(skip(self, request), fields(model = %request.model(), input_len = request.input().len()))]
    async fn create_response(&self, request: &ResponsesRequest) -> RepscoreResult<Value> {
        let api_key = self.api_key()?;
        let url = self.config.responses_url();
        debug!(url = %url, "Sending responses request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Request failed: {}", e);
                ProviderError::new(ProviderErrorKind::Transport(e.to_string()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            ProviderError::new(ProviderErrorKind::Transport(e.to_string()))
        })?;

        if !status.is_success() {
            let message = provider_message(&body);
            error!(status = status.as_u16(), message = %message, "Provider returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        let envelope: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response: {}", e);
            ProviderError::new(ProviderErrorKind::Decode(e.to_string()))
        })?;

        debug!(body_len = body.len(), "Responses request successful");
        Ok(envelope)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
