use scriptsmith_core::{BackendId, ScriptsmithConfig};
use scriptsmith_interface::{CompletionRequest, TextBackend};
use scriptsmith_models::{Credentials, OpenRouterClient};

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openrouter_balanced_round_trip() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ScriptsmithConfig::default();
    let credentials = Credentials::from_env()?;
    let client = OpenRouterClient::from_credentials(&credentials, config.openrouter())?;

    let profile = config.backends().get(BackendId::Balanced);
    let request = CompletionRequest::builder()
        .backend(BackendId::Balanced)
        .model(profile.model().clone())
        .prompt("Say OK")
        .max_tokens(10u32)
        .temperature(*profile.temperature())
        .timeout_secs(*profile.timeout_secs())
        .build()?;

    let completion = client.call(&request).await?;
    assert!(!completion.content().is_empty(), "Should receive non-empty response");
    println!("Response: {}", completion.content());

    Ok(())
}
