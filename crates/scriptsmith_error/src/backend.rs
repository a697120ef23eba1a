//! Backend error types.

/// A backend answered, but with something the caller cannot use.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error ({}): {} at line {} in {}", backend, message, line, file)]
pub struct BackendError {
    /// Backend that produced the response (e.g. "openrouter", "serper")
    pub backend: String,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError for the named backend at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_error::BackendError;
    ///
    /// let err = BackendError::new("openrouter", "response had no choices");
    /// assert_eq!(err.backend, "openrouter");
    /// assert!(format!("{}", err).contains("no choices"));
    /// ```
    #[track_caller]
    pub fn new(backend: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            backend: backend.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
