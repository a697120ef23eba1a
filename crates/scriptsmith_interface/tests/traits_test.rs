use async_trait::async_trait;
use scriptsmith_core::{BackendId, OriginalityReport, SearchHit};
use scriptsmith_error::ScriptsmithResult;
use scriptsmith_interface::{
    Completion, CompletionRequest, OriginalityBackend, ResearchBackend, TextBackend,
};
use std::sync::Arc;

struct EchoBackend;

#[async_trait]
impl TextBackend for EchoBackend {
    async fn call(&self, request: &CompletionRequest) -> ScriptsmithResult<Completion> {
        Ok(Completion::new(request.prompt().to_uppercase(), Some(3)))
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }
}

struct StaticSearch;

#[async_trait]
impl ResearchBackend for StaticSearch {
    async fn search(&self, query: &str) -> ScriptsmithResult<Vec<SearchHit>> {
        Ok(vec![SearchHit::builder().title(query).build().unwrap()])
    }
}

struct AlwaysOriginal;

#[async_trait]
impl OriginalityBackend for AlwaysOriginal {
    async fn check(&self, _text: &str) -> OriginalityReport {
        OriginalityReport::original()
    }
}

#[tokio::test]
async fn backends_are_object_safe() -> anyhow::Result<()> {
    let text: Arc<dyn TextBackend> = Arc::new(EchoBackend);
    let research: Arc<dyn ResearchBackend> = Arc::new(StaticSearch);
    let originality: Arc<dyn OriginalityBackend> = Arc::new(AlwaysOriginal);

    let request = CompletionRequest::builder()
        .backend(BackendId::Balanced)
        .model("test-model")
        .prompt("keep")
        .max_tokens(100u32)
        .temperature(0.3f32)
        .build()?;

    let completion = text.call(&request).await?;
    assert_eq!(completion.content(), "KEEP");
    assert_eq!(*completion.tokens_used(), Some(3));
    assert_eq!(text.provider_name(), "echo");

    let hits = research.search("rust").await?;
    assert_eq!(hits[0].title(), "rust");

    assert!(originality.check("text").await.passed());
    Ok(())
}

#[test]
fn completion_request_requires_prompt() {
    let result = CompletionRequest::builder()
        .backend(BackendId::Premium)
        .model("m")
        .max_tokens(1u32)
        .temperature(0.7f32)
        .build();
    assert!(result.is_err());
}
