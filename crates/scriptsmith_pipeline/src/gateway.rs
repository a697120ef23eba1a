//! Per-run access to the three text backends with cost accounting.

use scriptsmith_core::{BackendId, BackendProfile, BackendProfiles, CostLedger};
use scriptsmith_error::{GenerationError, GenerationErrorKind, ScriptsmithResult};
use scriptsmith_interface::{CompletionRequest, TextBackend};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Outcome of a single backend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The backend produced text.
    Success {
        /// Generated text.
        text: String,
        /// Tokens billed, when reported.
        tokens_used: Option<u32>,
    },
    /// The call failed in transport or returned an unusable payload.
    Failure {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl CallOutcome {
    /// Text of a successful call.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text, .. } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    /// Text of a successful call, or an empty string.
    pub fn into_text_or_empty(self) -> String {
        match self {
            Self::Success { text, .. } => text,
            Self::Failure { .. } => String::new(),
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Model gateway owned by a single generation run.
///
/// Every invocation is charged to the run's [`CostLedger`] before the
/// backend is called, so failed calls are still accounted for.
///
/// # Examples
///
/// ```no_run
/// use scriptsmith_core::{BackendId, BackendProfiles};
/// use scriptsmith_interface::TextBackend;
/// use scriptsmith_pipeline::ModelGateway;
/// use std::sync::Arc;
///
/// # async fn example(backend: Arc<dyn TextBackend>) {
/// let mut gateway = ModelGateway::new(backend, BackendProfiles::default(), 32_000);
/// let outcome = gateway.invoke(BackendId::Fast, "Write ONE YouTube hook about: Rust", 200).await;
/// println!("{:?} after {} calls", outcome, gateway.ledger().api_call_count());
/// # }
/// ```
pub struct ModelGateway {
    backend: Arc<dyn TextBackend>,
    profiles: BackendProfiles,
    output_token_ceiling: u32,
    ledger: CostLedger,
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("provider", &self.backend.provider_name())
            .field("output_token_ceiling", &self.output_token_ceiling)
            .field("ledger", &self.ledger)
            .finish()
    }
}

impl ModelGateway {
    /// Create a gateway with an empty ledger.
    pub fn new(
        backend: Arc<dyn TextBackend>,
        profiles: BackendProfiles,
        output_token_ceiling: u32,
    ) -> Self {
        Self {
            backend,
            profiles,
            output_token_ceiling,
            ledger: CostLedger::default(),
        }
    }

    /// Profile bound to a backend identity.
    pub fn profile(&self, id: BackendId) -> &BackendProfile {
        self.profiles.get(id)
    }

    /// Hard cap on output tokens for large generation calls.
    pub fn output_token_ceiling(&self) -> u32 {
        self.output_token_ceiling
    }

    /// Limit a requested output-token budget to the ceiling.
    pub fn cap_tokens(&self, requested: usize) -> u32 {
        u32::try_from(requested)
            .unwrap_or(u32::MAX)
            .min(self.output_token_ceiling)
    }

    /// The run's ledger so far.
    pub fn ledger(&self) -> &CostLedger {
        &self.ledger
    }

    /// Charge a research lookup without counting a model call.
    pub fn record_research(&mut self, cost: f64) {
        self.ledger.record_research(cost);
    }

    /// Invoke a backend at its profile temperature.
    pub async fn invoke(&mut self, id: BackendId, prompt: &str, max_tokens: u32) -> CallOutcome {
        let temperature = *self.profile(id).temperature();
        self.invoke_at(id, prompt, max_tokens, temperature).await
    }

    /// Invoke a backend with an explicit temperature.
    #[instrument(skip(self, prompt), fields(backend = %id, prompt_words = prompt.split_whitespace().count()))]
    pub async fn invoke_at(
        &mut self,
        id: BackendId,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> CallOutcome {
        let profile = self.profiles.get(id);
        let cost = profile.estimate_cost(prompt, max_tokens);
        self.ledger.record_call(cost);
        debug!(cost, total = *self.ledger.api_cost_estimate(), "Charged backend call");

        let request = match CompletionRequest::builder()
            .backend(id)
            .model(profile.model().clone())
            .prompt(prompt)
            .max_tokens(max_tokens)
            .temperature(temperature)
            .timeout_secs(*profile.timeout_secs())
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                return CallOutcome::Failure {
                    reason: e.to_string(),
                };
            }
        };

        match self.backend.call(&request).await {
            Ok(completion) => {
                let tokens_used = *completion.tokens_used();
                CallOutcome::Success {
                    text: completion.into_content(),
                    tokens_used,
                }
            }
            Err(e) => {
                warn!(error = %e, "Backend call failed");
                CallOutcome::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Invoke a backend whose output the run cannot do without.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::CriticalBackend`] when the call fails.
    pub async fn invoke_required(
        &mut self,
        id: BackendId,
        stage: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> ScriptsmithResult<String> {
        match self.invoke(id, prompt, max_tokens).await {
            CallOutcome::Success { text, .. } => Ok(text),
            CallOutcome::Failure { reason } => Err(GenerationError::new(
                GenerationErrorKind::CriticalBackend {
                    backend: id.to_string(),
                    stage: stage.to_string(),
                    reason,
                },
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scriptsmith_error::{HttpError, ScriptsmithResult};
    use scriptsmith_interface::Completion;

    struct Down;

    #[async_trait]
    impl TextBackend for Down {
        async fn call(&self, _request: &CompletionRequest) -> ScriptsmithResult<Completion> {
            Err(HttpError::with_status(503, "unavailable").into())
        }

        fn provider_name(&self) -> &'static str {
            "down"
        }
    }

    fn gateway() -> ModelGateway {
        ModelGateway::new(Arc::new(Down), BackendProfiles::default(), 32_000)
    }

    #[tokio::test]
    async fn test_failed_calls_are_still_charged() {
        let mut gateway = gateway();
        let outcome = gateway.invoke(BackendId::Fast, "hook please", 200).await;
        assert!(!outcome.is_success());
        assert_eq!(*gateway.ledger().api_call_count(), 1);
        assert!((*gateway.ledger().api_cost_estimate() - 0.001).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_required_failure_is_critical() {
        let mut gateway = gateway();
        let err = gateway
            .invoke_required(BackendId::Premium, "sections", "Create a script", 100)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("premium"));
        assert!(message.contains("sections"));
        assert!(message.contains("503"));
    }

    #[test]
    fn test_research_is_not_a_call() {
        let mut gateway = gateway();
        gateway.record_research(0.01);
        assert_eq!(*gateway.ledger().api_call_count(), 0);
        assert_eq!(gateway.ledger().cost_label(), "$0.01");
    }

    #[test]
    fn test_cap_tokens() {
        let gateway = gateway();
        assert_eq!(gateway.cap_tokens(1_000), 1_000);
        assert_eq!(gateway.cap_tokens(90_000), 32_000);
    }
}
