//! The generation run: stage sequencing, tier gating and failure handling.

use crate::{
    MarkerExtractor, ModelGateway, ScriptDraft, SecondOpinion, build_full_script,
    collect_viral_patterns, generate_bonus, generate_hooks, generate_sections,
    generate_with_ab_testing, polish, quality_gate, select_best, trim_to_target,
};
use scriptsmith_core::{
    GenerationRequest, GenerationResult, OriginalityReport, ScriptsmithConfig, TierConfig,
    clamp_target_words, plan,
};
use scriptsmith_error::{BuilderError, ScriptsmithResult};
use scriptsmith_interface::{OriginalityBackend, ResearchBackend, SectionExtractor, TextBackend};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Stages a run passes through, in order.
///
/// Optional stages have a `*Skipped` counterpart; any error before
/// [`RunStage::Formatted`] ends the run in [`RunStage::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStage {
    /// Run created.
    Init,
    /// Word targets planned.
    DistributionComputed,
    /// Viral patterns collected.
    ResearchDone,
    /// Research disabled or unavailable.
    ResearchSkipped,
    /// Hook candidates generated.
    HooksGenerated,
    /// Best hook chosen.
    HookSelected,
    /// Body sections generated.
    SectionsGenerated,
    /// Polish passes applied.
    Polished,
    /// Advisory quality gate ran.
    QualityChecked,
    /// Quality gate disabled for the tier.
    QualitySkipped,
    /// Originality checked.
    PlagiarismChecked,
    /// Originality check disabled or unavailable.
    PlagiarismSkipped,
    /// Script trimmed to the target.
    Trimmed,
    /// Bonus content generated.
    BonusGenerated,
    /// Bonus content disabled or failed.
    BonusSkipped,
    /// Result assembled.
    Formatted,
    /// Run finished.
    Done,
    /// Run aborted with an error result.
    Failed,
}

/// Runs the full generation pipeline for one request at a time.
///
/// Holds only immutable configuration and shared backend handles; every
/// call to [`Orchestrator::generate`] gets its own gateway and ledger, so
/// concurrent runs never share mutable state.
///
/// # Examples
///
/// ```no_run
/// use scriptsmith_core::{GenerationRequest, QualityTier};
/// use scriptsmith_interface::TextBackend;
/// use scriptsmith_pipeline::Orchestrator;
/// use std::sync::Arc;
///
/// # async fn example(backend: Arc<dyn TextBackend>) -> Result<(), Box<dyn std::error::Error>> {
/// let orchestrator = Orchestrator::builder().text_backend(backend).build()?;
/// let request = GenerationRequest::new("The Future of AI", "Exploring AI trends", "AI", 1000, QualityTier::Low);
/// let result = orchestrator.generate(&request).await;
/// println!("{}", result.full_script());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_builder::Builder, derive_getters::Getters)]
#[builder(pattern = "owned", build_fn(private, name = "build_internal"))]
pub struct Orchestrator {
    /// Tier table, backend profiles and pipeline settings.
    #[builder(default)]
    config: ScriptsmithConfig,
    /// Backend serving the fast, balanced and premium roles.
    text_backend: Arc<dyn TextBackend>,
    /// Web search for viral research.
    #[builder(default, setter(strip_option))]
    research_backend: Option<Arc<dyn ResearchBackend>>,
    /// Plagiarism check.
    #[builder(default, setter(strip_option))]
    originality_backend: Option<Arc<dyn OriginalityBackend>>,
    /// Section delimiter extraction.
    #[builder(default = "Arc::new(MarkerExtractor) as Arc<dyn SectionExtractor>")]
    extractor: Arc<dyn SectionExtractor>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.text_backend.provider_name())
            .field("research", &self.research_backend.is_some())
            .field("originality", &self.originality_backend.is_some())
            .finish_non_exhaustive()
    }
}

impl OrchestratorBuilder {
    /// Build the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns an error if no text backend was set.
    pub fn build(self) -> ScriptsmithResult<Orchestrator> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::new("Orchestrator", e))?)
    }
}

impl Orchestrator {
    /// Creates a new orchestrator builder.
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    /// A copy that cannot perform research.
    pub fn without_research(&self) -> Self {
        Self {
            research_backend: None,
            ..self.clone()
        }
    }

    /// A copy that researches through `research`.
    pub fn with_research(&self, research: Arc<dyn ResearchBackend>) -> Self {
        Self {
            research_backend: Some(research),
            ..self.clone()
        }
    }

    /// A fresh gateway with an empty ledger for one run.
    ///
    /// Work done through it before [`Orchestrator::generate_with`] is
    /// reported as part of that run.
    pub fn new_gateway(&self) -> ModelGateway {
        ModelGateway::new(
            Arc::clone(&self.text_backend),
            self.config.backends().clone(),
            *self.config.pipeline().output_token_ceiling(),
        )
    }

    /// Generate a script.
    ///
    /// Never returns an error: a failed run yields a result with
    /// `success == false`, the error text, and no script content.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        self.generate_with(self.new_gateway(), request).await
    }

    /// Generate a script on a gateway that may already carry charges.
    ///
    /// The result's cost and call count include everything the gateway's
    /// ledger recorded before the run started.
    #[instrument(
        skip(self, gateway, request),
        fields(title = %request.title(), tier = %request.quality_tier(), words = *request.target_word_count())
    )]
    pub async fn generate_with(
        &self,
        mut gateway: ModelGateway,
        request: &GenerationRequest,
    ) -> GenerationResult {
        let started = Instant::now();
        let tier = *request.quality_tier();
        let tier_config = self.config.tiers().get(tier);
        info!(stage = %RunStage::Init, "Starting generation");

        let outcome = self.run(&mut gateway, request, tier_config).await;
        let elapsed = format!("{:.2}s", started.elapsed().as_secs_f64());
        let ledger = gateway.ledger();

        match outcome {
            Ok(result) => {
                info!(
                    stage = %RunStage::Done,
                    elapsed = %elapsed,
                    cost = %ledger.cost_label(),
                    api_calls = *ledger.api_call_count(),
                    "Script generated"
                );
                result.with_run_metadata(elapsed, ledger.cost_label(), *ledger.api_call_count())
            }
            Err(e) => {
                error!(stage = %RunStage::Failed, error = %e, "Generation failed");
                GenerationResult::failure(request.title().clone(), tier, e).with_run_metadata(
                    elapsed,
                    ledger.cost_label(),
                    *ledger.api_call_count(),
                )
            }
        }
    }

    async fn run(
        &self,
        gateway: &mut ModelGateway,
        request: &GenerationRequest,
        tier_config: &TierConfig,
    ) -> ScriptsmithResult<GenerationResult> {
        let pipeline = self.config.pipeline();
        let extractor = self.extractor.as_ref();
        let title = request.title();
        let description = request.description();
        let keywords = request.keywords();

        let target = clamp_target_words(*request.target_word_count());
        let inflated = (f64::from(target) * *pipeline.target_inflation()) as u32;
        let distribution = plan(inflated);
        debug!(stage = %RunStage::DistributionComputed, target, inflated, "Word budget planned");

        let research = self
            .research_backend
            .as_deref()
            .filter(|_| *tier_config.enable_viral_research());
        let viral_patterns = if research.is_some() {
            let patterns = collect_viral_patterns(
                gateway,
                research,
                self.config.research(),
                title,
                keywords,
            )
            .await;
            debug!(stage = %RunStage::ResearchDone, patterns = patterns.len(), "Research finished");
            patterns
        } else {
            debug!(stage = %RunStage::ResearchSkipped, "Research skipped");
            Vec::new()
        };

        let hooks = generate_hooks(
            gateway,
            title,
            description,
            *tier_config.hook_count(),
            *distribution.hook(),
            &viral_patterns,
        )
        .await;
        debug!(stage = %RunStage::HooksGenerated, hooks = hooks.len(), "Hooks generated");

        let second_opinion = if *tier_config.enable_second_opinion() {
            SecondOpinion::BelowScore(*pipeline.second_opinion_threshold())
        } else {
            SecondOpinion::Disabled
        };
        let hook = select_best(gateway, &hooks, title, second_opinion).await?;
        debug!(stage = %RunStage::HookSelected, "Hook selected");

        let sections = if *tier_config.enable_ab_testing() {
            generate_with_ab_testing(gateway, extractor, title, description, keywords, &distribution)
                .await?
        } else {
            generate_sections(gateway, extractor, title, description, keywords, &distribution)
                .await?
        };
        debug!(stage = %RunStage::SectionsGenerated, words = sections.total_words(), "Sections generated");

        let mut polished =
            polish(gateway, extractor, &sections, *tier_config.polish_pass_count()).await?;
        debug!(stage = %RunStage::Polished, words = polished.total_words(), "Sections polished");

        if *tier_config.enable_second_opinion() {
            polished = quality_gate(gateway, &polished, inflated).await;
            debug!(stage = %RunStage::QualityChecked, "Quality gate finished");
        } else {
            debug!(stage = %RunStage::QualitySkipped, "Quality gate skipped");
        }

        let originality = match self
            .originality_backend
            .as_deref()
            .filter(|_| *tier_config.enable_originality_check())
        {
            Some(checker) => {
                let report = checker.check(&build_full_script(&hook, &polished)).await;
                info!(stage = %RunStage::PlagiarismChecked, message = %report.message(), "Originality checked");
                report
            }
            None => {
                debug!(stage = %RunStage::PlagiarismSkipped, "Originality check skipped");
                OriginalityReport::not_checked()
            }
        };

        let trimmed = trim_to_target(&polished, target, *pipeline.trim_tolerance());
        debug!(stage = %RunStage::Trimmed, words = trimmed.total_words(), "Trimmed");

        let bonus = if *tier_config.enable_bonus_content() {
            let bonus = generate_bonus(gateway, title).await;
            let stage = if bonus.is_some() {
                RunStage::BonusGenerated
            } else {
                RunStage::BonusSkipped
            };
            debug!(stage = %stage, "Bonus stage finished");
            bonus
        } else {
            debug!(stage = %RunStage::BonusSkipped, "Bonus skipped");
            None
        };

        let result = ScriptDraft::builder()
            .title(title.clone())
            .target_word_count(target)
            .quality_tier(*request.quality_tier())
            .hook(hook)
            .sections(trimmed)
            .originality(originality)
            .viral_patterns(viral_patterns)
            .bonus(bonus)
            .build()?
            .into_result(tier_config)?;
        debug!(stage = %RunStage::Formatted, "Result formatted");
        Ok(result)
    }
}
