//! Request and response types for text backends.

use scriptsmith_core::BackendId;
use scriptsmith_error::{BuilderError, ScriptsmithResult};
use serde::{Deserialize, Serialize};

/// A single-prompt completion request.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::BackendId;
/// use scriptsmith_interface::CompletionRequest;
///
/// let request = CompletionRequest::builder()
///     .backend(BackendId::Fast)
///     .model("google/gemini-2.5-pro")
///     .prompt("Write ONE YouTube hook about: Rust")
///     .max_tokens(200u32)
///     .temperature(0.8f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.max_tokens(), 200);
/// assert_eq!(*request.timeout_secs(), 30);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct CompletionRequest {
    /// Role the call is made under.
    backend: BackendId,
    /// Provider model identifier.
    model: String,
    /// The user prompt.
    prompt: String,
    /// Output-token limit.
    max_tokens: u32,
    /// Sampling temperature.
    temperature: f32,
    /// Request timeout in seconds.
    #[builder(default = "30")]
    timeout_secs: u64,
}

impl CompletionRequest {
    /// Creates a new request builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

impl CompletionRequestBuilder {
    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing.
    pub fn build(&self) -> ScriptsmithResult<CompletionRequest> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::new("CompletionRequest", e))?)
    }
}

/// Text returned by a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Completion {
    /// Generated text.
    content: String,
    /// Tokens billed, when the provider reports them.
    tokens_used: Option<u32>,
}

impl Completion {
    /// Create a completion.
    pub fn new(content: impl Into<String>, tokens_used: Option<u32>) -> Self {
        Self {
            content: content.into(),
            tokens_used,
        }
    }

    /// Consume the completion, returning its text.
    pub fn into_content(self) -> String {
        self.content
    }
}
