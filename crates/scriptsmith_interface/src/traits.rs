//! Collaborator traits.

use crate::{Completion, CompletionRequest};
use async_trait::async_trait;
use scriptsmith_core::{OriginalityReport, SearchHit};
use scriptsmith_error::ScriptsmithResult;

/// A backend that turns a prompt into text.
///
/// Implementations perform exactly one provider request per call and never
/// retry; the pipeline decides how to degrade on failure.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Complete a single prompt.
    async fn call(&self, request: &CompletionRequest) -> ScriptsmithResult<Completion>;

    /// Provider name (e.g., "openrouter").
    fn provider_name(&self) -> &'static str;
}

/// A web search backend.
#[async_trait]
pub trait ResearchBackend: Send + Sync {
    /// Search the web, returning organic hits in rank order.
    async fn search(&self, query: &str) -> ScriptsmithResult<Vec<SearchHit>>;
}

/// A plagiarism detection backend.
///
/// Never fails: problems are reported as an unchecked, passing report.
#[async_trait]
pub trait OriginalityBackend: Send + Sync {
    /// Check text against the web.
    async fn check(&self, text: &str) -> OriginalityReport;
}

/// Pulls a delimited section out of model output.
pub trait SectionExtractor: Send + Sync {
    /// Text between `[marker]` and `[/marker]`, trimmed; empty when absent.
    fn extract(&self, content: &str, marker: &str) -> String;
}
