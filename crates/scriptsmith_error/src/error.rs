//! Top-level error wrapper types.

use crate::{
    BackendError, BuilderError, ConfigError, GenerationError, HttpError, JsonError,
    ValidationError,
};

/// Every error family a Scriptsmith operation can surface.
///
/// # Examples
///
/// ```
/// use scriptsmith_error::{HttpError, ScriptsmithError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ScriptsmithError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScriptsmithErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Backend returned an unusable response
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration or credential error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Invalid caller input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Script generation pipeline error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Scriptsmith error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scriptsmith_error::{ConfigError, ScriptsmithResult};
///
/// fn might_fail() -> ScriptsmithResult<()> {
///     Err(ConfigError::new("OPENROUTER_API_KEY not set"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scriptsmith Error: {}", _0)]
pub struct ScriptsmithError(Box<ScriptsmithErrorKind>);

impl ScriptsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: ScriptsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScriptsmithErrorKind {
        &self.0
    }

    /// Whether this error came from invalid caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), ScriptsmithErrorKind::Validation(_))
    }
}

// Generic From implementation for any type that converts to ScriptsmithErrorKind
impl<T> From<T> for ScriptsmithError
where
    T: Into<ScriptsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Scriptsmith operations.
///
/// # Examples
///
/// ```
/// use scriptsmith_error::{HttpError, ScriptsmithResult};
///
/// fn fetch_data() -> ScriptsmithResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type ScriptsmithResult<T> = std::result::Result<T, ScriptsmithError>;
