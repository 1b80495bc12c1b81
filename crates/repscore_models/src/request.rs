//! Responses API request body.

use derive_builder::Builder;
use derive_getters::Getters;
use repscore_error::{ConfigError, RepscoreResult};
use serde::{Deserialize, Serialize};

/// Request body for one Responses API call.
///
/// Sampling temperature is pinned to zero and cannot be changed through the
/// builder: repeated scoring of the same session must be reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ResponsesRequest {
    /// Model identifier
    model: String,
    /// System-level instructions (the engine prompt)
    instructions: String,
    /// User-level input (the serialized payload)
    input: String,
    /// Sampling temperature
    #[builder(setter(skip), default = "0.0")]
    temperature: f32,
}

impl ResponsesRequest {
    /// Creates a new builder for `ResponsesRequest`.
    pub fn builder() -> ResponsesRequestBuilder {
        ResponsesRequestBuilder::default()
    }

    /// Build a request from its three parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_models::ResponsesRequest;
    ///
    /// let request = ResponsesRequest::new("gpt-4o-mini", "Score this call.", "{}").unwrap();
    /// assert_eq!(*request.temperature(), 0.0);
    /// ```
    pub fn new(
        model: impl Into<String>,
        instructions: impl Into<String>,
        input: impl Into<String>,
    ) -> RepscoreResult<Self> {
        Self::builder()
            .model(model)
            .instructions(instructions)
            .input(input)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid responses request: {}", e)).into())
    }
}
