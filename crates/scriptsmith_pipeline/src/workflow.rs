//! Open-lead and active-engagement workflows over a shared orchestrator.
//!
//! Research access is decided by construction: an [`OpenLeadWorkflow`]
//! holds an orchestrator stripped of its research backend, while an
//! [`ActiveEngagementWorkflow`] cannot be built without one.

use crate::{JobPosting, LeadBrief, Orchestrator, generate_lead_brief, keywords_from_hits};
use scriptsmith_core::{GenerationRequest, GenerationResult, QualityTier, SearchHit};
use scriptsmith_error::{BuilderError, ScriptsmithResult, ValidationError, ValidationErrorKind};
use scriptsmith_interface::ResearchBackend;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shortest client title that passes the advisory check.
pub const MIN_CLIENT_TITLE_CHARS: usize = 5;
/// Shortest client briefing that passes the advisory check.
pub const MIN_CLIENT_BRIEFING_CHARS: usize = 20;

/// Which workflow produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowKind {
    /// Script for an open lead; no research.
    OpenLead,
    /// Script for a client engagement; research required.
    ActiveEngagement,
}

/// Where the script title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TitleSource {
    /// Generated from a job posting, or supplied already generated.
    Generated,
    /// Supplied verbatim by the client.
    Client,
}

/// Static description of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct WorkflowInfo {
    /// Workflow identity.
    workflow: WorkflowKind,
    /// Short description.
    #[getter(skip)]
    description: &'static str,
    /// Title origin.
    title_source: TitleSource,
    /// Whether the workflow searches the web.
    research_required: bool,
    /// Tier used when the caller gives none.
    default_tier: QualityTier,
}

impl WorkflowInfo {
    /// Short description.
    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// A workflow run's result plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
pub struct WorkflowOutcome {
    /// The generation result.
    result: GenerationResult,
    /// Workflow that ran.
    workflow: WorkflowKind,
    /// Title origin.
    title_source: TitleSource,
    /// Hits from the client-title search.
    research: Vec<SearchHit>,
    /// Brief generated from an open-lead posting.
    lead_brief: Option<LeadBrief>,
}

impl WorkflowOutcome {
    /// Consume the outcome, keeping the result.
    pub fn into_result(self) -> GenerationResult {
        self.result
    }
}

/// Generation for open leads, where research is not permitted.
#[derive(Debug, Clone)]
pub struct OpenLeadWorkflow {
    orchestrator: Orchestrator,
}

impl OpenLeadWorkflow {
    /// Wrap an orchestrator, removing its research backend.
    pub fn new(orchestrator: &Orchestrator) -> Self {
        Self {
            orchestrator: orchestrator.without_research(),
        }
    }

    /// Workflow description.
    pub fn info() -> WorkflowInfo {
        WorkflowInfo {
            workflow: WorkflowKind::OpenLead,
            description: "Open leads",
            title_source: TitleSource::Generated,
            research_required: false,
            default_tier: QualityTier::Low,
        }
    }

    fn outcome(result: GenerationResult, lead_brief: Option<LeadBrief>) -> WorkflowOutcome {
        WorkflowOutcome {
            result,
            workflow: WorkflowKind::OpenLead,
            title_source: TitleSource::Generated,
            research: Vec::new(),
            lead_brief,
        }
    }

    /// Generate a script for a request whose title was already generated.
    #[instrument(skip(self, request), fields(title = %request.title()))]
    pub async fn run(&self, request: &GenerationRequest) -> WorkflowOutcome {
        Self::outcome(self.orchestrator.generate(request).await, None)
    }

    /// Generate the brief for a job posting, then the script.
    ///
    /// An empty posting fails validation before any backend is called. The
    /// brief's calls are charged to the same run as the script.
    #[instrument(skip_all, fields(tier = %posting.quality_tier()))]
    pub async fn run_posting(&self, posting: &JobPosting) -> WorkflowOutcome {
        if let Err(e) = posting.validate() {
            warn!(error = %e, "Rejected job posting");
            let result =
                GenerationResult::failure(crate::DEFAULT_LEAD_TITLE, *posting.quality_tier(), e);
            return Self::outcome(result, None);
        }

        let mut gateway = self.orchestrator.new_gateway();
        let brief = generate_lead_brief(&mut gateway, posting).await;
        let request = GenerationRequest::new(
            brief.title().clone(),
            brief.briefing().clone(),
            brief.keywords().clone(),
            *posting.target_word_count(),
            *posting.quality_tier(),
        );
        let result = self.orchestrator.generate_with(gateway, &request).await;
        Self::outcome(result, Some(brief))
    }
}

/// A client's script order.
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct ClientBrief {
    /// Title supplied by the client; used verbatim.
    #[builder(default)]
    title: String,
    /// Client briefing, used as the description.
    #[builder(default)]
    briefing: String,
    /// Keywords; derived from research when empty.
    #[builder(default)]
    keywords: String,
    /// Requested length in words.
    #[builder(default = "scriptsmith_core::DEFAULT_TARGET_WORDS")]
    target_word_count: u32,
    /// Requested tier.
    #[builder(default = "QualityTier::High")]
    quality_tier: QualityTier,
}

impl ClientBrief {
    /// Creates a new brief builder.
    pub fn builder() -> ClientBriefBuilder {
        ClientBriefBuilder::default()
    }

    /// Advisory problems with the brief; empty when it looks fine.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_pipeline::ClientBrief;
    ///
    /// let brief = ClientBrief::builder().title("AI").briefing("short").build().unwrap();
    /// assert_eq!(brief.issues().len(), 2);
    /// ```
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.title.trim().chars().count() < MIN_CLIENT_TITLE_CHARS {
            issues.push(format!(
                "Client title must have at least {} characters",
                MIN_CLIENT_TITLE_CHARS
            ));
        }
        if self.briefing.trim().chars().count() < MIN_CLIENT_BRIEFING_CHARS {
            issues.push(format!(
                "Client briefing must have at least {} characters",
                MIN_CLIENT_BRIEFING_CHARS
            ));
        }
        issues
    }

    fn validate(&self) -> ScriptsmithResult<()> {
        if self.title.trim().is_empty() {
            return Err(
                ValidationError::new(ValidationErrorKind::MissingField("title".to_string())).into(),
            );
        }
        Ok(())
    }
}

impl ClientBriefBuilder {
    /// Build the brief.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder is inconsistent.
    pub fn build(&self) -> ScriptsmithResult<ClientBrief> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::new("ClientBrief", e))?)
    }
}

/// Generation for client engagements: client title, mandatory research.
#[derive(Clone)]
pub struct ActiveEngagementWorkflow {
    orchestrator: Orchestrator,
    research: Arc<dyn ResearchBackend>,
}

impl std::fmt::Debug for ActiveEngagementWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveEngagementWorkflow")
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}

impl ActiveEngagementWorkflow {
    /// Wrap an orchestrator, routing its research through `research`.
    pub fn new(orchestrator: &Orchestrator, research: Arc<dyn ResearchBackend>) -> Self {
        Self {
            orchestrator: orchestrator.with_research(Arc::clone(&research)),
            research,
        }
    }

    /// Workflow description.
    pub fn info() -> WorkflowInfo {
        WorkflowInfo {
            workflow: WorkflowKind::ActiveEngagement,
            description: "Client engagements",
            title_source: TitleSource::Client,
            research_required: true,
            default_tier: QualityTier::High,
        }
    }

    fn outcome(&self, result: GenerationResult, research: Vec<SearchHit>) -> WorkflowOutcome {
        WorkflowOutcome {
            result,
            workflow: WorkflowKind::ActiveEngagement,
            title_source: TitleSource::Client,
            research,
            lead_brief: None,
        }
    }

    /// Research the client title and generate the script.
    ///
    /// An empty title fails validation before any backend is called. The
    /// client search is charged to the run; a failed search is logged and
    /// the run continues without hits.
    #[instrument(skip(self, brief), fields(title = %brief.title()))]
    pub async fn run(&self, brief: &ClientBrief) -> WorkflowOutcome {
        if let Err(e) = brief.validate() {
            warn!(error = %e, "Rejected client brief");
            let result = GenerationResult::failure(brief.title().clone(), brief.quality_tier, e);
            return self.outcome(result, Vec::new());
        }
        for issue in brief.issues() {
            warn!(issue = %issue, "Client brief issue");
        }

        let mut gateway = self.orchestrator.new_gateway();
        gateway.record_research(*self.orchestrator.config().research().cost_per_search());
        let hits = match self.research.search(brief.title()).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "Client research failed, continuing without it");
                Vec::new()
            }
        };

        let keywords = if brief.keywords().trim().is_empty() {
            keywords_from_hits(&hits).join(", ")
        } else {
            brief.keywords().clone()
        };
        info!(hits = hits.len(), keywords = %keywords, "Client research finished");

        let request = GenerationRequest::new(
            brief.title().clone(),
            brief.briefing().clone(),
            keywords,
            brief.target_word_count,
            brief.quality_tier,
        );
        let result = self.orchestrator.generate_with(gateway, &request).await;
        self.outcome(result, hits)
    }
}
