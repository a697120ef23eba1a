//! JSON error types.

/// JSON decode/encode error with a short preview of the offending payload.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// First 100 characters of the payload, when available
    pub preview: String,
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
    /// use scriptsmith_error::JsonError;
    ///
    /// let err = JsonError::new("expected value at line 1");
    /// assert!(err.preview.is_empty());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_payload(message, "")
    }

    /// Create a JsonError that remembers the start of the payload.
    #[track_caller]
    pub fn with_payload(message: impl Into<String>, payload: &str) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            preview: payload.chars().take(100).collect(),
            line: location.line(),
            file: location.file(),
        }
    }
}
