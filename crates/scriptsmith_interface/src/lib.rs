//! Trait definitions for Scriptsmith collaborators.
//!
//! The generation pipeline talks to the outside world only through these
//! traits: a text backend for model calls, a research backend for web
//! search, an originality backend for plagiarism checks, and a section
//! extractor that pulls delimited sections out of model output.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{OriginalityBackend, ResearchBackend, SectionExtractor, TextBackend};
pub use types::{Completion, CompletionRequest, CompletionRequestBuilder};
