//! Trait seam between the request handler and the provider.

use crate::ResponsesRequest;
use async_trait::async_trait;
use repscore_error::RepscoreResult;
use serde_json::Value;

/// Anything that can answer a Responses API request.
///
/// Implementations return the provider's response envelope unmodified;
/// pulling text out of it is the caller's job.
#[async_trait]
pub trait ResponsesDriver: Send + Sync {
    /// Issue exactly one request and return the raw envelope.
    async fn create_response(&self, request: &ResponsesRequest) -> RepscoreResult<Value>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier requests should use.
    fn model_name(&self) -> &str;
}
