//! Configuration error types.

/// Configuration or credential error with source location.
///
/// Raised at construction time and never retried.
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
    /// use scriptsmith_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse scriptsmith.toml");
    /// assert!(err.message.contains("scriptsmith.toml"));
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

    /// A required credential environment variable is absent or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_error::ConfigError;
    ///
    /// let err = ConfigError::missing_credential("OPENROUTER_API_KEY");
    /// assert!(err.message.contains("OPENROUTER_API_KEY"));
    /// ```
    #[track_caller]
    pub fn missing_credential(variable: &str) -> Self {
        Self::new(format!("{} is not set", variable))
    }
}
