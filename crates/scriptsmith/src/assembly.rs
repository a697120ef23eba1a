//! Wiring configuration and credentials into an orchestrator.

use scriptsmith_core::ScriptsmithConfig;
use scriptsmith_error::ScriptsmithResult;
use scriptsmith_interface::{OriginalityBackend, ResearchBackend};
use scriptsmith_models::{CopyscapeClient, Credentials, OpenRouterClient, SerperClient};
use scriptsmith_pipeline::Orchestrator;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Web search backend, if a search key is configured.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be initialized.
pub fn research_backend(
    config: &ScriptsmithConfig,
    credentials: &Credentials,
) -> ScriptsmithResult<Option<Arc<dyn ResearchBackend>>> {
    let Some(api_key) = credentials.serper_api_key() else {
        debug!("No search key configured");
        return Ok(None);
    };
    let client = SerperClient::new(api_key.clone(), config.research())?;
    Ok(Some(Arc::new(client)))
}

/// Originality backend, if originality credentials are configured.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be initialized.
pub fn originality_backend(
    config: &ScriptsmithConfig,
    credentials: &Credentials,
) -> ScriptsmithResult<Option<Arc<dyn OriginalityBackend>>> {
    let Some(copyscape) = credentials.copyscape() else {
        debug!("No originality credentials configured");
        return Ok(None);
    };
    let client = CopyscapeClient::new(copyscape.clone(), config.originality())?;
    Ok(Some(Arc::new(client)))
}

/// Build an orchestrator backed by the HTTP clients.
///
/// Research and originality checks are wired in only when their credentials
/// are present; tiers that enable them skip those stages otherwise.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be initialized.
#[instrument(skip_all)]
pub fn build_orchestrator(
    config: &ScriptsmithConfig,
    credentials: &Credentials,
) -> ScriptsmithResult<Orchestrator> {
    let text = OpenRouterClient::from_credentials(credentials, config.openrouter())?;
    let mut builder = Orchestrator::builder()
        .config(config.clone())
        .text_backend(Arc::new(text));

    let research = research_backend(config, credentials)?;
    let originality = originality_backend(config, credentials)?;
    info!(
        research = research.is_some(),
        originality = originality.is_some(),
        "Backends configured"
    );

    if let Some(research) = research {
        builder = builder.research_backend(research);
    }
    if let Some(originality) = originality {
        builder = builder.originality_backend(originality);
    }
    builder.build()
}
