//! Provider connection settings.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default Responses API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection settings for the LLM provider.
///
/// The API key is optional here so the service can start without one; the
/// client refuses to issue a request until it is set.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Builder, derive_getters::Getters)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL; `/responses` is appended
    base_url: String,
    /// Model identifier used for both engines
    model: String,
    /// Bearer credential
    #[serde(skip_serializing)]
    api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl ProviderConfig {
    /// Creates a new builder for `ProviderConfig`.
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::default()
    }

    /// Full URL of the responses endpoint.
    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }

    /// Whether a non-empty credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
