//! Work-sample briefs generated from open-lead job postings.
//!
//! An open lead comes with a job posting but no title. The brief step asks
//! the premium backend for a script title, a briefing and keywords, pulls
//! budget, hours and duration out of the posting text, and for postings
//! that look valuable has the balanced backend review the title. A low
//! review score triggers a premium rewrite, which is only accepted when it
//! still reads as a video title rather than an application.

use crate::ModelGateway;
use regex::{Captures, Regex};
use scriptsmith_core::{BackendId, QualityTier};
use scriptsmith_error::{BuilderError, ScriptsmithResult, ValidationError, ValidationErrorKind};
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

/// Title used when the title call fails.
pub const DEFAULT_LEAD_TITLE: &str = "Script Work Sample";
/// Briefing used when the briefing call fails.
pub const DEFAULT_LEAD_BRIEFING: &str = "Script briefing could not be generated.";
/// Placeholder for job details the posting does not state.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Review scores below this trigger a title rewrite.
pub const REVIEW_PASS_SCORE: u32 = 8;
/// Score assumed when the review reply carries none.
pub const DEFAULT_REVIEW_SCORE: u32 = 7;

/// Words that mark a rewritten title as an application headline.
pub const APPLICATION_TITLE_WORDS: [&str; 6] = [
    "experienced",
    "available",
    "hire",
    "freelancer",
    "writer",
    "ready to",
];
/// Phrases that mark a rewritten briefing as first-person pitch.
pub const FIRST_PERSON_PHRASES: [&str; 4] = ["i'm", "i am", "my experience", "hire me"];
/// Phrases that mark a generated briefing as a cover letter.
pub const COVER_LETTER_PHRASES: [&str; 4] = ["hi there", "i'm excited", "best regards", "let me help"];
/// Posting markers that make a lead worth a title review.
pub const REVIEW_TRIGGERS: [&str; 5] = ["$100", "$200", "$300", "expert", "top-tier"];

const TITLE_MAX_TOKENS: u32 = 100;
const BRIEFING_MAX_TOKENS: u32 = 1000;
const KEYWORDS_MAX_TOKENS: u32 = 150;
const REVIEW_MAX_TOKENS: u32 = 500;
const IMPROVE_MAX_TOKENS: u32 = 1000;
const TITLE_CONTEXT_CHARS: usize = 500;
const SHORT_CONTEXT_CHARS: usize = 300;

static BUDGET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\$(\d+(?:\.\d{2})?)\s*[-–]\s*\$(\d+(?:\.\d{2})?)",
        r"(?i)\$(\d+)\s*to\s*\$(\d+)",
        r"(?i)\$(\d+)/hr",
        r"(?i)\$(\d+)\s*hourly",
    ])
});
static HOURS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(\d+)-(\d+)\s*hrs?/week",
        r"(?i)More than\s*(\d+)\s*hrs?/week",
        r"(?i)(\d+)\+?\s*hrs?/week",
        r"(?i)(\d+)\+?\s*hours?\s*per\s*week",
    ])
});
static DURATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(\d+)\s*to\s*(\d+)\s*months?",
        r"(?i)(\d+)-(\d+)\s*months?",
        r"(?i)(\d+)\s*months?",
        r"(?i)(\d+)\s*weeks?",
    ])
});
static REVIEW_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SCORE:\s*(\d+)").expect("valid regex"));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect()
}

/// First pattern that matches, with its index in `patterns`.
fn first_match<'t>(patterns: &[Regex], text: &'t str) -> Option<(usize, Captures<'t>)> {
    patterns
        .iter()
        .enumerate()
        .find_map(|(index, pattern)| pattern.captures(text).map(|caps| (index, caps)))
}

fn head(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|needle| lower.contains(needle))
}

/// Budget, weekly hours and duration stated in a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct JobDetails {
    /// Budget range or hourly rate.
    budget: String,
    /// Weekly hours.
    hours: String,
    /// Engagement length.
    duration: String,
}

/// Pull budget, hours and duration out of a job posting.
///
/// The first matching pattern per field wins; fields the posting does not
/// state are [`NOT_SPECIFIED`].
///
/// # Examples
///
/// ```
/// use scriptsmith_pipeline::extract_job_details;
///
/// let details = extract_job_details("Budget $40.00 - $60.00, 10-20 hrs/week, 3 to 6 months");
/// assert_eq!(details.budget(), "$40.00-$60.00");
/// assert_eq!(details.hours(), "10-20 hours/week");
/// assert_eq!(details.duration(), "3-6 months");
/// ```
pub fn extract_job_details(text: &str) -> JobDetails {
    let budget = match first_match(&BUDGET_PATTERNS, text) {
        Some((_, caps)) => match (caps.get(1), caps.get(2)) {
            (Some(low), Some(high)) => format!("${}-${}", low.as_str(), high.as_str()),
            (Some(rate), None) => format!("${}/hour", rate.as_str()),
            _ => NOT_SPECIFIED.to_string(),
        },
        None => NOT_SPECIFIED.to_string(),
    };

    let hours = match first_match(&HOURS_PATTERNS, text) {
        Some((_, caps)) => match (caps.get(1), caps.get(2)) {
            (Some(low), Some(high)) => format!("{}-{} hours/week", low.as_str(), high.as_str()),
            (Some(least), None) => format!("{}+ hours/week", least.as_str()),
            _ => NOT_SPECIFIED.to_string(),
        },
        None => NOT_SPECIFIED.to_string(),
    };

    let duration = match first_match(&DURATION_PATTERNS, text) {
        Some((index, caps)) => match (caps.get(1), caps.get(2)) {
            (Some(low), Some(high)) => format!("{}-{} months", low.as_str(), high.as_str()),
            (Some(weeks), None) if index == 3 => format!("{} weeks", weeks.as_str()),
            (Some(months), None) => format!("{} months", months.as_str()),
            _ => NOT_SPECIFIED.to_string(),
        },
        None => NOT_SPECIFIED.to_string(),
    };

    JobDetails {
        budget,
        hours,
        duration,
    }
}

/// An open-lead job posting to produce a work sample for.
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct JobPosting {
    /// Posting text as published.
    #[builder(default)]
    text: String,
    /// Requested script length in words.
    #[builder(default = "scriptsmith_core::DEFAULT_TARGET_WORDS")]
    target_word_count: u32,
    /// Requested tier.
    #[builder(default = "QualityTier::Low")]
    quality_tier: QualityTier,
}

impl JobPosting {
    /// Creates a new posting builder.
    pub fn builder() -> JobPostingBuilder {
        JobPostingBuilder::default()
    }

    /// Whether the generated title deserves a review.
    ///
    /// True for postings naming a $100-$300 budget or asking for expert or
    /// top-tier work.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_pipeline::JobPosting;
    ///
    /// let posting = JobPosting::builder().text("Looking for an EXPERT scriptwriter").build().unwrap();
    /// assert!(posting.needs_review());
    /// ```
    pub fn needs_review(&self) -> bool {
        contains_any(&self.text, &REVIEW_TRIGGERS)
    }

    pub(crate) fn validate(&self) -> ScriptsmithResult<()> {
        if self.text.trim().is_empty() {
            return Err(
                ValidationError::new(ValidationErrorKind::MissingField("text".to_string())).into(),
            );
        }
        Ok(())
    }
}

impl JobPostingBuilder {
    /// Build the posting.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder is inconsistent.
    pub fn build(&self) -> ScriptsmithResult<JobPosting> {
        Ok(self
            .build_internal()
            .map_err(|e| BuilderError::new("JobPosting", e))?)
    }
}

/// Title, briefing and keywords generated for an open lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct LeadBrief {
    /// Generated script title.
    title: String,
    /// Briefing for the script writer, used as the description.
    briefing: String,
    /// Comma-separated keywords.
    keywords: String,
    /// Budget, hours and duration from the posting.
    job_details: JobDetails,
    /// Review score out of 10; `None` when no review ran or it failed.
    review_score: Option<u32>,
    /// Whether the posting qualified for a review.
    reviewed: bool,
}

fn title_prompt(posting: &str) -> String {
    format!(
        "Create a YouTube script title for a work sample that demonstrates expertise for this job:\n\n\
         Job: {}\n\n\
         The title must:\n\
         1. Be a real, clickable YouTube video title\n\
         2. Fit the job's topic and show competence\n\
         3. Spark curiosity (numbers, promises, secrets)\n\
         4. Be at most 60 characters\n\n\
         This is a script title for a work sample, not an application.\n\
         Return ONLY the script title, nothing else.",
        head(posting, TITLE_CONTEXT_CHARS)
    )
}

fn briefing_prompt(title: &str) -> String {
    format!(
        "Prepare a script briefing for this generated title: \"{title}\"\n\n\
         Sections:\n\
         === TITLE PROMISE ===\n\
         === AUDIENCE ===\n\
         === CORE MESSAGES ===\n\
         === SCRIPT REQUIREMENTS ===\n\
         === TONE ===\n\
         === CONCRETE CONTENT ===\n\n\
         This is a technical briefing for writing the script, not an application.\n\
         Focus on what the script needs to deliver on the title's promise."
    )
}

fn keywords_prompt(posting: &str) -> String {
    format!(
        "Extract 8 highly relevant keywords from this job posting:\n{}\n\n\
         Focus on skills, tools, deliverables and industry terms.\n\
         Return ONLY comma-separated keywords.",
        head(posting, SHORT_CONTEXT_CHARS)
    )
}

fn review_prompt(posting: &str, title: &str, briefing: &str, keywords: &str) -> String {
    format!(
        "Review this YouTube script title and briefing for a work sample:\n\n\
         JOB CONTEXT: {}\n\n\
         SCRIPT TITLE: {title}\n\
         BRIEFING: {}\n\
         KEYWORDS: {keywords}\n\n\
         Rate 1-10: is the title clickable, does it show niche expertise, is the \
         briefing clear, are the keywords relevant?\n\n\
         Return format:\n\
         SCORE: X/10\n\
         IMPROVEMENTS: [suggestions for a better YouTube title]",
        head(posting, SHORT_CONTEXT_CHARS),
        head(briefing, SHORT_CONTEXT_CHARS)
    )
}

fn improve_prompt(title: &str, briefing: &str, review: &str) -> String {
    format!(
        "Improve this YouTube script title based on feedback:\n\n\
         ORIGINAL TITLE: {title}\n\
         ORIGINAL BRIEFING: {briefing}\n\n\
         REVIEW FEEDBACK: {review}\n\n\
         Return a YouTube video title of at most 60 characters, not an application \
         title. No \"Experienced\", \"Available\" or \"Hire me\".\n\n\
         Return format:\n\
         Title: [YouTube script title]\n\
         Description: [updated briefing if needed]"
    )
}

/// Score from a review reply, or [`DEFAULT_REVIEW_SCORE`].
///
/// # Examples
///
/// ```
/// use scriptsmith_pipeline::parse_review_score;
///
/// assert_eq!(parse_review_score("SCORE: 6/10\nIMPROVEMENTS: shorter"), 6);
/// assert_eq!(parse_review_score("looks fine"), 7);
/// ```
pub fn parse_review_score(review: &str) -> u32 {
    REVIEW_SCORE
        .captures(review)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_REVIEW_SCORE)
}

/// Title line and description block of a rewrite reply.
///
/// The title is the rest of the line after `Title:`; the description is
/// everything after `Description:`. Empty values count as absent.
pub fn parse_rewrite(reply: &str) -> (Option<String>, Option<String>) {
    let title = reply
        .split_once("Title:")
        .and_then(|(_, rest)| rest.lines().next())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty());
    let description = reply
        .split_once("Description:")
        .map(|(_, rest)| rest.trim().to_string())
        .filter(|text| !text.is_empty());
    (title, description)
}

fn clean_title(raw: &str) -> Option<String> {
    let title = raw.trim().trim_matches('"').trim();
    (!title.is_empty()).then(|| title.to_string())
}

async fn generate_briefing(gateway: &mut ModelGateway, title: &str) -> String {
    let prompt = briefing_prompt(title);
    let mut briefing = gateway
        .invoke(BackendId::Premium, &prompt, BRIEFING_MAX_TOKENS)
        .await
        .into_text_or_empty();

    if contains_any(&briefing, &COVER_LETTER_PHRASES) {
        warn!("Briefing reads like a cover letter, retrying");
        let retry = format!("{prompt}\n\nNO APPLICATION TEXT. Technical briefing only, no first person.");
        briefing = gateway
            .invoke(BackendId::Premium, &retry, BRIEFING_MAX_TOKENS)
            .await
            .into_text_or_empty();
    }

    match briefing.trim() {
        "" => DEFAULT_LEAD_BRIEFING.to_string(),
        text => text.to_string(),
    }
}

/// Balanced review of the title, then a premium rewrite below the pass score.
///
/// Returns the possibly rewritten title and briefing plus the score, which
/// is `None` when the review call failed.
async fn review_and_improve(
    gateway: &mut ModelGateway,
    posting: &str,
    title: String,
    briefing: String,
    keywords: &str,
) -> (String, String, Option<u32>) {
    let prompt = review_prompt(posting, &title, &briefing, keywords);
    let Some(review) = gateway
        .invoke(BackendId::Balanced, &prompt, REVIEW_MAX_TOKENS)
        .await
        .text()
        .map(str::to_string)
    else {
        warn!("Title review failed, keeping generated brief");
        return (title, briefing, None);
    };

    let score = parse_review_score(&review);
    info!(score, "Title reviewed");
    if score >= REVIEW_PASS_SCORE {
        return (title, briefing, Some(score));
    }

    let prompt = improve_prompt(&title, &briefing, &review);
    let outcome = gateway
        .invoke(BackendId::Premium, &prompt, IMPROVE_MAX_TOKENS)
        .await;
    let Some(reply) = outcome.text() else {
        warn!("Title rewrite failed, keeping generated title");
        return (title, briefing, Some(score));
    };

    let (new_title, new_briefing) = parse_rewrite(reply);
    let title = match new_title {
        Some(candidate) if contains_any(&candidate, &APPLICATION_TITLE_WORDS) => {
            warn!(candidate = %candidate, "Rewrite produced an application title, keeping original");
            title
        }
        Some(candidate) => candidate,
        None => title,
    };
    let briefing = match new_briefing {
        Some(candidate) if !contains_any(&candidate, &FIRST_PERSON_PHRASES) => candidate,
        _ => briefing,
    };
    (title, briefing, Some(score))
}

/// Generate the title, briefing and keywords for an open lead.
///
/// Never fails: each failed call falls back to a default and the brief is
/// still produced. Every call is charged to `gateway`.
#[instrument(skip_all, fields(posting_chars = posting.text().len()))]
pub async fn generate_lead_brief(gateway: &mut ModelGateway, posting: &JobPosting) -> LeadBrief {
    let text = posting.text();

    let title = gateway
        .invoke(BackendId::Premium, &title_prompt(text), TITLE_MAX_TOKENS)
        .await
        .text()
        .and_then(clean_title)
        .unwrap_or_else(|| {
            warn!("Title generation failed, using default title");
            DEFAULT_LEAD_TITLE.to_string()
        });
    debug!(title = %title, "Lead title generated");

    let job_details = extract_job_details(text);
    let briefing = generate_briefing(gateway, &title).await;

    let keywords = gateway
        .invoke(BackendId::Premium, &keywords_prompt(text), KEYWORDS_MAX_TOKENS)
        .await
        .into_text_or_empty()
        .trim()
        .to_string();

    let reviewed = posting.needs_review();
    let (title, briefing, review_score) = if reviewed {
        review_and_improve(gateway, text, title, briefing, &keywords).await
    } else {
        (title, briefing, None)
    };

    info!(
        title = %title,
        reviewed,
        budget = %job_details.budget(),
        "Lead brief ready"
    );
    LeadBrief {
        title,
        briefing,
        keywords,
        job_details,
        review_score,
        reviewed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_formats() {
        assert_eq!(extract_job_details("Pay: $25/hr").budget(), "$25/hour");
        assert_eq!(extract_job_details("$30 hourly").budget(), "$30/hour");
        assert_eq!(extract_job_details("$100 to $250").budget(), "$100-$250");
        assert_eq!(extract_job_details("$15.00–$20.00 fixed").budget(), "$15.00-$20.00");
    }

    #[test]
    fn test_hours_prefer_ranges() {
        assert_eq!(extract_job_details("10-20 hrs/week").hours(), "10-20 hours/week");
        assert_eq!(extract_job_details("More than 30 hrs/week").hours(), "30+ hours/week");
        assert_eq!(extract_job_details("about 5 hours per week").hours(), "5+ hours/week");
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(extract_job_details("1-3 months").duration(), "1-3 months");
        assert_eq!(extract_job_details("for 2 weeks").duration(), "2 weeks");
        assert_eq!(extract_job_details("6 months").duration(), "6 months");
    }

    #[test]
    fn test_unstated_details() {
        let details = extract_job_details("Write a script about cats");
        assert_eq!(details.budget(), NOT_SPECIFIED);
        assert_eq!(details.hours(), NOT_SPECIFIED);
        assert_eq!(details.duration(), NOT_SPECIFIED);
    }

    #[test]
    fn test_review_triggers() {
        let posting = |text: &str| JobPosting::builder().text(text).build().unwrap();
        assert!(posting("Budget $200 fixed").needs_review());
        assert!(posting("Top-Tier writers only").needs_review());
        assert!(!posting("Budget $50, friendly client").needs_review());
    }

    #[test]
    fn test_parse_rewrite() {
        let (title, description) =
            parse_rewrite("Title: 7 Secrets of Cat Videos\nDescription: Focus on virality.\nMore.");
        assert_eq!(title.as_deref(), Some("7 Secrets of Cat Videos"));
        assert_eq!(description.as_deref(), Some("Focus on virality.\nMore."));
        assert_eq!(parse_rewrite("nothing useful"), (None, None));
    }

    #[test]
    fn test_clean_title_strips_quotes() {
        assert_eq!(clean_title("  \"Why Cats Rule\"\n").as_deref(), Some("Why Cats Rule"));
        assert_eq!(clean_title("\"\""), None);
    }
}
