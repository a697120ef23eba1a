//! Scriptsmith - tiered YouTube script generation
//!
//! Scriptsmith turns a title, description and keywords into a structured,
//! length-targeted video script by cascading calls across three model tiers:
//! a fast model writes hook candidates, a premium model selects hooks and
//! writes and polishes the body, and a balanced model gives second opinions.
//!
//! # Features
//!
//! - **Quality tiers**: `low`, `medium` and `high` gate A/B testing, viral
//!   research, originality checks and bonus content
//! - **Length control**: word budgets per section, inflated up front and
//!   trimmed back after polishing
//! - **Workflows**: open leads (no research) and client engagements
//!   (client title, mandatory research)
//! - **Cost accounting**: every run reports its call count and estimated spend
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scriptsmith::{Credentials, GenerationRequest, QualityTier, ScriptsmithConfig, build_orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScriptsmithConfig::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let orchestrator = build_orchestrator(&config, &credentials)?;
//!
//!     let request = GenerationRequest::new(
//!         "The Future of AI",
//!         "Exploring AI trends",
//!         "AI, future tech",
//!         1000,
//!         QualityTier::Low,
//!     );
//!     let result = orchestrator.generate(&request).await;
//!     println!("{}", result.full_script());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Scriptsmith is organized as a workspace with focused crates:
//!
//! - `scriptsmith_error` - Error types
//! - `scriptsmith_core` - Requests, results, tiers, word planning, configuration
//! - `scriptsmith_interface` - Backend traits
//! - `scriptsmith_models` - OpenRouter, Serper and Copyscape clients
//! - `scriptsmith_pipeline` - Generation stages, orchestrator and workflows
//!
//! This crate (`scriptsmith`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod report;

pub use assembly::{build_orchestrator, originality_backend, research_backend};
pub use report::{render_summary, tier_overview};

// Re-export the workspace crates
pub use scriptsmith_core::*;
pub use scriptsmith_error::*;
pub use scriptsmith_interface::*;
pub use scriptsmith_models::*;
pub use scriptsmith_pipeline::*;
