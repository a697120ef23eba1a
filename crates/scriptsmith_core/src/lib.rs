//! Core data types for Scriptsmith.
//!
//! This crate provides the data model shared by every Scriptsmith crate:
//! requests and results, the tier table, section sets and the word-budget
//! planner, plus layered configuration and tracing setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod ledger;
mod lookup;
mod planner;
mod profile;
mod request;
mod result;
mod section;
mod telemetry;
mod tier;

pub use config::{
    DEFAULT_CONFIG, OpenRouterSettings, OriginalitySettings, PipelineSettings, ResearchSettings,
    ScriptsmithConfig,
};
pub use ledger::CostLedger;
pub use lookup::{MatchedSource, OriginalityReport, SearchHit, SearchHitBuilder};
pub use planner::plan;
pub use profile::{BackendId, BackendProfile, BackendProfiles};
pub use request::{
    DEFAULT_TARGET_WORDS, GenerationRequest, GenerationRequestBuilder, MAX_TARGET_WORDS,
    MIN_TARGET_WORDS, clamp_target_words,
};
pub use result::{
    BonusContent, CHAPTER_TITLES, Chapter, GenerationResult, GenerationResultBuilder,
};
pub use section::{Section, SectionSet, WordDistribution, word_count};
pub use telemetry::init_tracing;
pub use tier::{QualityTier, TierConfig, TierTable};
