//! Input validation error types.

/// Specific conditions under which caller input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A required field was missing or blank
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// A field was present but could not be interpreted
    #[display("Invalid value for '{}': {}", field, reason)]
    InvalidField {
        /// The field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Validation error raised before any network call is made.
///
/// # Examples
///
/// ```
/// use scriptsmith_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::MissingField("client title".into()));
/// assert!(format!("{}", err).contains("client title"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The specific validation failure
    pub kind: ValidationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
