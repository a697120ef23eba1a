//! HTTP transport error types.

/// Transport failure talking to a remote service, with source location.
///
/// Carries the HTTP status when the service answered with a non-success code,
/// and `None` when the request never completed (connect error, timeout).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Status code returned by the remote service, if any
    pub status: Option<u16>,
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
    /// use scriptsmith_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// assert!(err.status.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an HttpError for a non-success status code.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_error::HttpError;
    ///
    /// let err = HttpError::with_status(503, "overloaded");
    /// assert_eq!(err.status, Some(503));
    /// assert!(err.message.contains("503"));
    /// ```
    #[track_caller]
    pub fn with_status(status: u16, body: impl AsRef<str>) -> Self {
        let location = std::panic::Location::caller();
        let body: String = body.as_ref().chars().take(200).collect();
        Self {
            message: format!("status {}: {}", status, body),
            status: Some(status),
            line: location.line(),
            file: location.file(),
        }
    }
}
