//! JSON error types.

/// JSON parse or serialization error with source location.
///
/// Covers model output that holds no usable JSON object, and payloads that
/// fail to serialize before being sent to an engine.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_error::JsonError;
    ///
    /// let err = JsonError::new("Could not parse JSON from model output.");
    /// assert!(format!("{}", err).starts_with("JSON Error: Could not parse"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A payload destined for an engine failed to serialize.
    #[track_caller]
    pub fn serialize(what: &str, err: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to serialize {}: {}", what, err))
    }
}
