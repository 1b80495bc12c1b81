//! HTTP error types.

/// HTTP server error with source location.
///
/// Used for failures of the serving layer itself (binding, serving), not for
/// provider responses, which are [`ProviderError`](crate::ProviderError)s.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_error::HttpError;
    ///
    /// let err = HttpError::new("Server error: connection reset");
    /// assert!(format!("{}", err).starts_with("HTTP Error: Server error"));
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

    /// The listener could not bind its address.
    #[track_caller]
    pub fn bind(addr: &str, err: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to bind {}: {}", addr, err))
    }

    /// The server stopped with an error.
    #[track_caller]
    pub fn serve(err: impl std::fmt::Display) -> Self {
        Self::new(format!("Server error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_message() {
        let err = HttpError::bind("0.0.0.0:3000", "address in use");
        assert_eq!(err.message, "Failed to bind 0.0.0.0:3000: address in use");
        assert!(err.file.ends_with("http.rs"));
    }
}
