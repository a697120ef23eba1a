//! Script generation pipeline error types.

/// Specific conditions that terminate a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// A call feeding the script structure failed
    #[display("{} backend call failed during {}: {}", backend, stage, reason)]
    CriticalBackend {
        /// Backend identity (fast, balanced, premium)
        backend: String,
        /// Pipeline stage that issued the call
        stage: String,
        /// Failure reason reported by the gateway
        reason: String,
    },
    /// Hook selection was asked to choose from nothing
    #[display("No hook candidates to select from")]
    NoHookCandidates,
}

/// Error type for generation pipeline failures.
///
/// # Examples
///
/// ```
/// use scriptsmith_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::NoHookCandidates);
/// assert!(format!("{}", err).contains("No hook candidates"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
