//! Errors raised while talking to the LLM provider.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Provider answered with a non-success status
    #[display("OpenAI error ({}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider-reported message, or the raw body
        message: String,
    },

    /// Request never produced a response
    #[display("Request failed: {}", _0)]
    Transport(String),

    /// Response body was not valid JSON
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
}

/// Provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The specific error kind
    pub kind: ProviderErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_error::{ProviderError, ProviderErrorKind};
    ///
    /// let err = ProviderError::new(ProviderErrorKind::Api {
    ///     status: 401,
    ///     message: "Incorrect API key provided".to_string(),
    /// });
    /// assert_eq!(err.kind.to_string(), "OpenAI error (401): Incorrect API key provided");
    /// ```
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// HTTP status reported by the provider, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ProviderErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
