//! Configuration error types.

/// Configuration error with source location.
///
/// Raised when configuration cannot be loaded, or when a value the provider
/// client needs (such as the API credential) is absent.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_error::ConfigError;
    ///
    /// let err = ConfigError::new("Scoring prompt is empty");
    /// assert!(format!("{}", err).starts_with("Configuration Error: Scoring prompt"));
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

    /// A required environment variable is unset or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_error::ConfigError;
    ///
    /// let err = ConfigError::missing_env("OPENAI_API_KEY");
    /// assert_eq!(err.message, "Missing OPENAI_API_KEY environment variable.");
    /// ```
    #[track_caller]
    pub fn missing_env(var: &str) -> Self {
        Self::new(format!("Missing {} environment variable.", var))
    }

    /// A configuration source could not be read or deserialized.
    #[track_caller]
    pub fn load_failed(what: &str, err: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to {}: {}", what, err))
    }
}
