//! Test utilities for pipeline tests.
//!
//! Mock backends answer by prompt substring so a whole generation run can be
//! scripted without network access.

#![allow(dead_code)]

use async_trait::async_trait;
use scriptsmith_core::{BackendId, OriginalityReport, SearchHit};
use scriptsmith_error::{HttpError, ScriptsmithResult};
use scriptsmith_interface::{
    Completion, CompletionRequest, OriginalityBackend, ResearchBackend, TextBackend,
};
use std::sync::{Arc, Mutex};

pub const HOOK_REPLY: &str = "1. Have you ever wondered why the future of AI matters to you?";

pub const SECTIONS_REPLY: &str = "[INTRO]\nAI is changing how we work and live every single day.\n[/INTRO]\n\
[KEYPOINTS]\n1. Models learn from data\n2. Automation frees up time\n3. Ethics matter more than ever\n4. Skills need updating\n[/KEYPOINTS]\n\
[CHAPTER1]\nMost people feel left behind by the pace of change.\n[/CHAPTER1]\n\
[CHAPTER2]\nLearning the basics step by step closes the gap.\n[/CHAPTER2]\n\
[CHAPTER3]\nStart with one tool, practice daily, and share what you learn.\n[/CHAPTER3]\n\
[CONCLUSION]\nThe future belongs to the curious. Subscribe for more.\n[/CONCLUSION]";

/// A single scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Return the prompt itself
    Echo,
    /// Fail with this HTTP status
    Fail(u16),
}

/// A recorded model call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub backend: BackendId,
    pub prompt: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    backend: Option<BackendId>,
    response: MockResponse,
}

/// Text backend answering by prompt substring.
///
/// Rules added later take precedence. Prompts matching no rule fail with a
/// 404.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    rules: Vec<Rule>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedBackend {
    /// A backend with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend answering every pipeline prompt successfully.
    pub fn deterministic() -> Self {
        Self::new()
            .on("Write ", MockResponse::Text("Regenerated section text about the topic.".into()))
            .on("Write ONE YouTube hook", MockResponse::Text(HOOK_REPLY.into()))
            .on("Select the BEST hook", MockResponse::Text("BEST: 2\nSCORE: 38\nREASON: strongest".into()))
            .on("Review this hook selection", MockResponse::Text("KEEP".into()))
            .on("Create a complete YouTube script", MockResponse::Text(SECTIONS_REPLY.into()))
            .on("Polish this script", MockResponse::Echo)
            .on("Compare these two script versions", MockResponse::Text("A".into()))
            .on("Quality check this YouTube script", MockResponse::Text("PASS".into()))
            .on(
                "Generate 3 thumbnail ideas",
                MockResponse::Text("1. Robot face | AI NOW\n2. Clock | TOO LATE?\n3. Brain | LEARN".into()),
            )
            .on(
                "Write YouTube video description",
                MockResponse::Text("Everything you need to know about AI. #AI #Future".into()),
            )
    }

    /// Answer prompts containing `needle` on any backend.
    pub fn on(mut self, needle: &str, response: MockResponse) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            backend: None,
            response,
        });
        self
    }

    /// Answer prompts containing `needle` on one backend only.
    pub fn on_backend(mut self, backend: BackendId, needle: &str, response: MockResponse) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            backend: Some(backend),
            response,
        });
        self
    }

    /// Fail prompts containing `needle` with a 502.
    pub fn failing_on(self, needle: &str) -> Self {
        self.on(needle, MockResponse::Fail(502))
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls whose prompt contains `needle`.
    pub fn calls_matching(&self, needle: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.prompt.contains(needle))
            .collect()
    }

    fn respond(&self, backend: BackendId, prompt: &str) -> MockResponse {
        self.rules
            .iter()
            .rev()
            .find(|rule| {
                prompt.contains(&rule.needle) && rule.backend.is_none_or(|id| id == backend)
            })
            .map(|rule| rule.response.clone())
            .unwrap_or(MockResponse::Fail(404))
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn call(&self, request: &CompletionRequest) -> ScriptsmithResult<Completion> {
        let backend = *request.backend();
        self.calls.lock().unwrap().push(RecordedCall {
            backend,
            prompt: request.prompt().clone(),
            max_tokens: *request.max_tokens(),
        });

        match self.respond(backend, request.prompt()) {
            MockResponse::Text(text) => Ok(Completion::new(text, Some(42))),
            MockResponse::Echo => Ok(Completion::new(request.prompt().clone(), None)),
            MockResponse::Fail(status) => {
                Err(HttpError::with_status(status, "scripted failure").into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Research backend returning fixed hits, or failing.
#[derive(Debug, Clone, Default)]
pub struct MockResearch {
    hits: Option<Vec<SearchHit>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockResearch {
    /// Always return these hits.
    pub fn new_success(hits: Vec<SearchHit>) -> Self {
        Self {
            hits: Some(hits),
            queries: Arc::default(),
        }
    }

    /// Always fail.
    pub fn new_error() -> Self {
        Self::default()
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResearchBackend for MockResearch {
    async fn search(&self, query: &str) -> ScriptsmithResult<Vec<SearchHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        self.hits
            .clone()
            .ok_or_else(|| HttpError::with_status(503, "search down").into())
    }
}

/// Originality backend returning a fixed report and keeping the texts it saw.
#[derive(Debug, Clone)]
pub struct MockOriginality {
    report: OriginalityReport,
    texts: Arc<Mutex<Vec<String>>>,
}

impl MockOriginality {
    /// Report the given match percentage against a 5% threshold.
    pub fn with_match(percentage: f64) -> Self {
        Self {
            report: OriginalityReport::from_match(percentage, 5.0),
            texts: Arc::default(),
        }
    }

    /// Texts submitted so far.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl OriginalityBackend for MockOriginality {
    async fn check(&self, text: &str) -> OriginalityReport {
        self.texts.lock().unwrap().push(text.to_string());
        self.report.clone()
    }
}

/// A search hit with the given title and snippet.
pub fn hit(title: &str, snippet: &str) -> SearchHit {
    SearchHit::builder()
        .title(title)
        .snippet(snippet)
        .url("https://example.test")
        .build()
        .unwrap()
}
