//! Tiered script generation pipeline for Scriptsmith.
//!
//! A run turns a [`GenerationRequest`](scriptsmith_core::GenerationRequest)
//! into a sectioned long-form script through a fixed cascade of model
//! calls: hooks from the fast backend, selection and section writing from
//! the premium backend, reviews from the balanced backend, plus optional
//! research, originality checking and bonus content depending on the tier.
//!
//! # Stages
//!
//! 1. Plan word targets ([`scriptsmith_core::plan`])
//! 2. Collect viral patterns ([`collect_viral_patterns`], highest tier)
//! 3. Generate and select hooks ([`generate_hooks`], [`select_best`])
//! 4. Generate sections ([`generate_sections`], [`generate_with_ab_testing`])
//! 5. Polish and review ([`polish`], [`quality_gate`])
//! 6. Check originality, trim ([`trim_to_target`]), add extras ([`generate_bonus`])
//! 7. Format the result ([`ScriptDraft`])
//!
//! Open leads that arrive as a job posting first get a title, briefing and
//! keywords from [`generate_lead_brief`].
//!
//! # Example
//!
//! ```rust,ignore
//! use scriptsmith_core::{GenerationRequest, QualityTier};
//! use scriptsmith_models::OpenRouterClient;
//! use scriptsmith_pipeline::Orchestrator;
//! use std::sync::Arc;
//!
//! let client = OpenRouterClient::from_credentials(&credentials, config.openrouter())?;
//! let orchestrator = Orchestrator::builder()
//!     .config(config)
//!     .text_backend(Arc::new(client))
//!     .build()?;
//!
//! let request = GenerationRequest::new("The Future of AI", "Exploring AI trends", "AI", 1000, QualityTier::Low);
//! let result = orchestrator.generate(&request).await;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bonus;
mod extraction;
mod fields;
mod format;
mod gateway;
mod hooks;
mod lead;
mod orchestrator;
mod refine;
mod research;
mod sections;
mod workflow;

pub use bonus::generate_bonus;
pub use extraction::{MarkerExtractor, wrap_in_marker};
pub use fields::{DEFAULT_TITLE, generate_from_fields, request_from_fields};
pub use format::{
    KEY_POINT_COUNT, KEY_POINT_MAX_CHARS, ScriptDraft, ScriptDraftBuilder, WORDS_PER_MINUTE,
    build_full_script, parse_key_points,
};
pub use gateway::{CallOutcome, ModelGateway};
pub use hooks::{
    DEFAULT_HOOK_SCORE, HOOK_STYLES, HookCandidate, MIN_HOOK_CHARS, SecondOpinion, fallback_hook,
    generate_hook_candidates, generate_hooks, parse_review, parse_selection, select_best,
};
pub use lead::{
    APPLICATION_TITLE_WORDS, COVER_LETTER_PHRASES, DEFAULT_LEAD_BRIEFING, DEFAULT_LEAD_TITLE,
    DEFAULT_REVIEW_SCORE, FIRST_PERSON_PHRASES, JobDetails, JobPosting, JobPostingBuilder,
    LeadBrief, NOT_SPECIFIED, REVIEW_PASS_SCORE, REVIEW_TRIGGERS, extract_job_details,
    generate_lead_brief, parse_review_score, parse_rewrite,
};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, RunStage};
pub use refine::{POLISH_FOCI, TRIM_ORDER, polish, quality_gate, trim_to_target};
pub use research::{
    KEYWORD_HIT_LIMIT, KEYWORD_LIMIT, KEYWORD_MIN_CHARS, VIRAL_SIGNALS, collect_viral_patterns,
    keywords_from_hits, viral_patterns_from_hits,
};
pub use sections::{
    AB_VARIANT_SUFFIX, AbChoice, FALLBACK_SECTION_WORDS, generate_sections,
    generate_single_section, generate_with_ab_testing, mega_prompt,
};
pub use workflow::{
    ActiveEngagementWorkflow, ClientBrief, ClientBriefBuilder, MIN_CLIENT_BRIEFING_CHARS,
    MIN_CLIENT_TITLE_CHARS, OpenLeadWorkflow, TitleSource, WorkflowInfo, WorkflowKind,
    WorkflowOutcome,
};
