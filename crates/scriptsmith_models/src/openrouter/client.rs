use super::{ChatMessage, ChatRequest, ChatResponse};
use crate::{Credentials, LlmMetrics, classify_error};
use async_trait::async_trait;
use reqwest::Client;
use scriptsmith_core::OpenRouterSettings;
use scriptsmith_error::{
    BackendError, BuilderError, HttpError, JsonError, ScriptsmithError, ScriptsmithResult,
};
use scriptsmith_interface::{Completion, CompletionRequest, TextBackend};
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

const PROVIDER: &str = "openrouter";

/// OpenRouter chat completions client.
///
/// One client serves all three backend roles; the model, token limit,
/// temperature and timeout come with each [`CompletionRequest`].
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    endpoint: String,
    referer: String,
    app_title: String,
}

impl std::fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("endpoint", &self.endpoint)
            .field("app_title", &self.app_title)
            .finish_non_exhaustive()
    }
}

impl OpenRouterClient {
    /// Creates a new OpenRouter client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key, settings), fields(endpoint = %settings.endpoint()))]
    pub fn new(api_key: impl Into<String>, settings: &OpenRouterSettings) -> ScriptsmithResult<Self> {
        debug!("Creating OpenRouter client");
        let client = Client::builder().build().map_err(|e| {
            HttpError::new(format!("Failed to initialize HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: settings.endpoint().clone(),
            referer: settings.referer().clone(),
            app_title: settings.app_title().clone(),
        })
    }

    /// Creates a client from loaded credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_credentials(
        credentials: &Credentials,
        settings: &OpenRouterSettings,
    ) -> ScriptsmithResult<Self> {
        Self::new(credentials.openrouter_api_key().clone(), settings)
    }

    /// Sends a chat request and returns the parsed response.
    #[instrument(skip(self, body, timeout), fields(model = %body.model()))]
    pub async fn send_chat(
        &self,
        body: &ChatRequest,
        timeout: Duration,
    ) -> ScriptsmithResult<ChatResponse> {
        debug!("Sending request to OpenRouter");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenRouter");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read OpenRouter response body");
            HttpError::new(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, "OpenRouter returned error");
            return Err(HttpError::with_status(status.as_u16(), &text).into());
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, "Failed to parse OpenRouter response");
            ScriptsmithError::from(JsonError::with_payload(
                format!("Failed to parse chat response: {}", e),
                &text,
            ))
        })
    }
}

#[async_trait]
impl TextBackend for OpenRouterClient {
    #[instrument(
        skip(self, request),
        fields(provider = PROVIDER, backend = %request.backend(), model = %request.model())
    )]
    async fn call(&self, request: &CompletionRequest) -> ScriptsmithResult<Completion> {
        let body = ChatRequest::builder()
            .model(request.model().clone())
            .messages(vec![ChatMessage::user(request.prompt().clone())])
            .max_tokens(*request.max_tokens())
            .temperature(*request.temperature())
            .build()
            .map_err(|e| BuilderError::new("ChatRequest", e))?;

        let metrics = LlmMetrics::get();
        let started = Instant::now();
        let outcome = self
            .send_chat(&body, Duration::from_secs(*request.timeout_secs()))
            .await
            .and_then(|response| {
                let content = response.first_text().ok_or_else(|| {
                    ScriptsmithError::from(BackendError::new(
                        PROVIDER,
                        "response contained no choices",
                    ))
                })?;
                let tokens_used = response.usage().map(|usage| *usage.total_tokens());
                Ok(Completion::new(content, tokens_used))
            });

        match &outcome {
            Ok(completion) => {
                let backend = request.backend().to_string();
                metrics.record_request(
                    PROVIDER,
                    &backend,
                    request.model(),
                    started.elapsed().as_secs_f64(),
                );
                if let Some(tokens) = completion.tokens_used() {
                    metrics.record_tokens(request.model(), u64::from(*tokens));
                }
                debug!(
                    words = completion.content().split_whitespace().count(),
                    "Completion received"
                );
            }
            Err(e) => {
                metrics.record_error(PROVIDER, request.model(), classify_error(e));
            }
        }

        outcome
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
