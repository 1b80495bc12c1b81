//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, JsonError, ProviderError, ValidationError};

/// Union of every error the service can raise.
///
/// # Examples
///
/// ```
/// use repscore_error::{RepscoreError, ConfigError};
///
/// let err: RepscoreError = ConfigError::new("Missing credential").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RepscoreErrorKind {
    /// Inbound request validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON parse/serialization error
    #[from(JsonError)]
    Json(JsonError),
    /// LLM provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// HTTP serving error
    #[from(HttpError)]
    Http(HttpError),
}

/// Repscore error with kind discrimination.
///
/// # Examples
///
/// ```
/// use repscore_error::{RepscoreResult, ValidationError};
///
/// fn validate() -> RepscoreResult<()> {
///     Err(ValidationError::new("Missing transcript."))?
/// }
///
/// let err = validate().unwrap_err();
/// assert_eq!(err.status(), 400);
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Repscore Error: {}", _0)]
pub struct RepscoreError(Box<RepscoreErrorKind>);

impl RepscoreError {
    /// Create a new error from a kind.
    pub fn new(kind: RepscoreErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RepscoreErrorKind {
        &self.0
    }

    /// Caller-facing message, without source location decoration.
    pub fn message(&self) -> String {
        match self.kind() {
            RepscoreErrorKind::Validation(e) => e.message.clone(),
            RepscoreErrorKind::Config(e) => e.message.clone(),
            RepscoreErrorKind::Json(e) => e.message.clone(),
            RepscoreErrorKind::Provider(e) => e.kind.to_string(),
            RepscoreErrorKind::Http(e) => e.message.clone(),
        }
    }

    /// HTTP status code this error maps to at the request boundary.
    pub fn status(&self) -> u16 {
        match self.kind() {
            RepscoreErrorKind::Validation(_) => 400,
            _ => 500,
        }
    }
}

// Generic From implementation for any type that converts to RepscoreErrorKind
impl<T> From<T> for RepscoreError
where
    T: Into<RepscoreErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Repscore operations.
pub type RepscoreResult<T> = std::result::Result<T, RepscoreError>;
