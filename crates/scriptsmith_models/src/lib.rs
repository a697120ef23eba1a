//! Backend clients for Scriptsmith.
//!
//! This crate provides the HTTP implementations of the collaborator traits
//! in `scriptsmith_interface`:
//!
//! - **OpenRouter** chat completions ([`OpenRouterClient`]) for all three
//!   model roles
//! - **Serper** web search ([`SerperClient`])
//! - **Copyscape** plagiarism detection ([`CopyscapeClient`])
//!
//! Credentials are read from the environment with [`Credentials::from_env`].
//!
//! # Example
//!
//! ```no_run
//! use scriptsmith_core::{BackendId, ScriptsmithConfig};
//! use scriptsmith_interface::{CompletionRequest, TextBackend};
//! use scriptsmith_models::{Credentials, OpenRouterClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScriptsmithConfig::load()?;
//! let credentials = Credentials::from_env()?;
//! let client = OpenRouterClient::from_credentials(&credentials, config.openrouter())?;
//!
//! let profile = config.backends().get(BackendId::Balanced);
//! let request = CompletionRequest::builder()
//!     .backend(BackendId::Balanced)
//!     .model(profile.model().clone())
//!     .prompt("Say OK")
//!     .max_tokens(10u32)
//!     .temperature(*profile.temperature())
//!     .timeout_secs(*profile.timeout_secs())
//!     .build()?;
//! let completion = client.call(&request).await?;
//! println!("{}", completion.content());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod copyscape;
mod credentials;
mod metrics;
mod openrouter;
mod serper;

pub use copyscape::{CopyscapeClient, parse_copyscape_response};
pub use credentials::{
    COPYSCAPE_API_KEY, COPYSCAPE_USERNAME, CopyscapeCredentials, Credentials, OPENROUTER_API_KEY,
    SERPER_API_KEY,
};
pub use metrics::{LlmMetrics, classify_error};
pub use openrouter::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage,
    OpenRouterClient,
};
pub use serper::{SerperClient, SerperQuery, SerperResponse};
