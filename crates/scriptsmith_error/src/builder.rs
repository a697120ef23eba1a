//! Builder-related errors.

/// A `derive_builder` builder was finished with missing or invalid fields.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error ({}): {} at line {} in {}", builder, message, line, file)]
pub struct BuilderError {
    /// Name of the type being built
    pub builder: &'static str,
    /// Message from the generated builder
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_error::BuilderError;
    ///
    /// let err = BuilderError::new("CompletionRequest", "`prompt` must be initialized");
    /// assert!(format!("{}", err).contains("CompletionRequest"));
    /// ```
    #[track_caller]
    pub fn new(builder: &'static str, message: impl std::fmt::Display) -> Self {
        let location = std::panic::Location::caller();
        Self {
            builder,
            message: message.to_string(),
            line: location.line(),
            file: location.file(),
        }
    }
}
