//! Hook generation and selection.

use crate::{CallOutcome, ModelGateway};
use regex::Regex;
use scriptsmith_core::BackendId;
use scriptsmith_error::{GenerationError, GenerationErrorKind, ScriptsmithResult};
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

/// Rhetorical styles, cycled in order across hook candidates.
pub const HOOK_STYLES: [&str; 7] = [
    "emotional and personal",
    "shocking and controversial",
    "mysterious and curious",
    "beneficial and valuable",
    "storytelling and narrative",
    "logical with statistics",
    "urgent and time-sensitive",
];

/// Responses shorter than this, once numbering is stripped, are replaced by a fallback.
pub const MIN_HOOK_CHARS: usize = 20;

/// Score assumed when the scoring reply carries none.
pub const DEFAULT_HOOK_SCORE: u32 = 30;

const SELECTION_MAX_TOKENS: u32 = 200;
const REVIEW_MAX_TOKENS: u32 = 100;
const SELECTION_PREVIEW_CHARS: usize = 100;
const REVIEW_PREVIEW_CHARS: usize = 80;

static NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d.\-*]+\s*").expect("valid regex"));
static BEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"BEST:\s*(\d+)").expect("valid regex"));
static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SCORE:\s*(\d+)").expect("valid regex"));
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// One generated hook and the style it was written in.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct HookCandidate {
    /// Rhetorical style from [`HOOK_STYLES`].
    style: &'static str,
    /// Hook text, or the fallback when generation failed.
    text: String,
}

impl HookCandidate {
    /// Create a candidate.
    pub fn new(style: &'static str, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    /// Consume the candidate, keeping the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// When the balanced backend reviews the premium backend's hook choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondOpinion {
    /// Never review.
    Disabled,
    /// Review when the composite score is below the given value.
    BelowScore(u32),
}

/// Deterministic hook used when generation fails.
///
/// # Examples
///
/// ```
/// use scriptsmith_pipeline::fallback_hook;
///
/// assert_eq!(
///     fallback_hook("shocking and controversial", "Rust"),
///     "Discover the shocking truth about Rust that will change everything."
/// );
/// ```
pub fn fallback_hook(style: &str, title: &str) -> String {
    let lead = style.split_whitespace().next().unwrap_or(style);
    format!("Discover the {lead} truth about {title} that will change everything.")
}

fn hook_prompt(title: &str, style: &str, target_words: u32, viral_pattern: Option<&str>) -> String {
    let pattern_line = viral_pattern
        .map(|pattern| format!("\n- Include pattern: {pattern}"))
        .unwrap_or_default();
    format!(
        "Write ONE YouTube hook about: {title}\n\n\
         Style: {style}\n\
         Length: Around {target_words} words\n\n\
         Requirements:\n\
         - Start with strong opening\n\
         - Create curiosity gap\n\
         - End with value promise\n\
         - Make it {style}{pattern_line}\n\n\
         Write ONLY the hook text. No labels, no numbers, just the hook."
    )
}

fn clean_hook(raw: &str) -> Option<String> {
    let stripped = NUMBERING.replace(raw.trim(), "");
    let hook = stripped.trim();
    (hook.chars().count() >= MIN_HOOK_CHARS).then(|| hook.to_string())
}

/// Generate `count` hook candidates, one fast-backend call each.
///
/// Never fails: a failed or too-short response is replaced by
/// [`fallback_hook`].
#[instrument(skip(gateway, description, viral_patterns), fields(title = %title, count))]
pub async fn generate_hook_candidates(
    gateway: &mut ModelGateway,
    title: &str,
    description: &str,
    count: u32,
    target_words_per_hook: u32,
    viral_patterns: &[String],
) -> Vec<HookCandidate> {
    debug!(description_chars = description.len(), "Generating hooks");
    let viral_pattern = viral_patterns.first().map(String::as_str);
    let max_tokens = target_words_per_hook.saturating_mul(2);

    let mut candidates = Vec::with_capacity(count as usize);
    for (index, style) in HOOK_STYLES.iter().cycle().take(count as usize).enumerate() {
        let prompt = hook_prompt(title, style, target_words_per_hook, viral_pattern);
        let outcome = gateway.invoke(BackendId::Fast, &prompt, max_tokens).await;

        let text = match outcome.text().and_then(clean_hook) {
            Some(hook) => {
                debug!(hook = index + 1, words = hook.split_whitespace().count(), "Hook generated");
                hook
            }
            None => {
                if let CallOutcome::Failure { reason } = &outcome {
                    warn!(hook = index + 1, reason = %reason, "Hook call failed, using fallback");
                } else {
                    warn!(hook = index + 1, "Hook too short, using fallback");
                }
                fallback_hook(style, title)
            }
        };
        candidates.push(HookCandidate::new(*style, text));
    }
    candidates
}

/// Generate `count` hooks and keep only their text.
pub async fn generate_hooks(
    gateway: &mut ModelGateway,
    title: &str,
    description: &str,
    count: u32,
    target_words_per_hook: u32,
    viral_patterns: &[String],
) -> Vec<String> {
    generate_hook_candidates(
        gateway,
        title,
        description,
        count,
        target_words_per_hook,
        viral_patterns,
    )
    .await
    .into_iter()
    .map(HookCandidate::into_text)
    .collect()
}

fn preview(hook: &str, chars: usize) -> String {
    hook.chars().take(chars).collect()
}

fn numbered_previews(hooks: &[String], chars: usize) -> String {
    hooks
        .iter()
        .enumerate()
        .map(|(i, hook)| format!("{}. {}...", i + 1, preview(hook, chars)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_number(regex: &Regex, reply: &str) -> Option<usize> {
    regex
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Map a 1-based choice into the candidate range.
fn clamp_choice(number: usize, len: usize) -> usize {
    number.saturating_sub(1).min(len.saturating_sub(1))
}

/// Parsed scoring reply: 0-based index and composite score.
pub fn parse_selection(reply: &str, hook_count: usize) -> (usize, u32) {
    let index = clamp_choice(parse_number(&BEST, reply).unwrap_or(1), hook_count);
    let score = parse_number(&SCORE, reply)
        .and_then(|s| u32::try_from(s).ok())
        .unwrap_or(DEFAULT_HOOK_SCORE);
    (index, score)
}

/// Parsed review reply: the redirected 0-based index, if any.
pub fn parse_review(reply: &str, hook_count: usize) -> Option<usize> {
    if !reply.to_uppercase().contains("CHANGE") {
        return None;
    }
    NUMBER
        .find(reply)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .map(|number| clamp_choice(number, hook_count))
}

/// Choose the strongest hook.
///
/// A single hook is returned without any backend call. Otherwise the premium
/// backend scores all previews; a low score can be reviewed by the balanced
/// backend according to `second_opinion`.
///
/// # Errors
///
/// Returns an error for an empty hook list or when the premium scoring call
/// fails.
#[instrument(skip(gateway, hooks), fields(title = %title, hooks = hooks.len()))]
pub async fn select_best(
    gateway: &mut ModelGateway,
    hooks: &[String],
    title: &str,
    second_opinion: SecondOpinion,
) -> ScriptsmithResult<String> {
    match hooks {
        [] => return Err(GenerationError::new(GenerationErrorKind::NoHookCandidates).into()),
        [only] => return Ok(only.clone()),
        _ => {}
    }

    let prompt = format!(
        "Select the BEST hook for YouTube script about: {title}\n\n\
         Analyze for:\n\
         1. Curiosity creation (0-10)\n\
         2. Emotional impact (0-10)\n\
         3. Clear value promise (0-10)\n\
         4. Viral potential (0-10)\n\n\
         Options:\n{}\n\n\
         Reply with:\n\
         BEST: [number]\n\
         SCORE: [total score/40]\n\
         REASON: [one sentence why]",
        numbered_previews(hooks, SELECTION_PREVIEW_CHARS)
    );
    let reply = gateway
        .invoke_required(BackendId::Premium, "hook selection", &prompt, SELECTION_MAX_TOKENS)
        .await?;
    let (mut index, score) = parse_selection(&reply, hooks.len());

    match second_opinion {
        SecondOpinion::BelowScore(threshold) if score < threshold => {
            index = review_selection(gateway, hooks, index, title).await;
        }
        _ => {}
    }

    info!(selected = index + 1, score, "Hook selected");
    Ok(hooks[index].clone())
}

async fn review_selection(
    gateway: &mut ModelGateway,
    hooks: &[String],
    current: usize,
    title: &str,
) -> usize {
    let prompt = format!(
        "Review this hook selection for: {title}\n\n\
         SELECTED: {}\n\n\
         Is this the best from these options?\n{}\n\n\
         Reply: KEEP or CHANGE to [number]",
        hooks[current],
        numbered_previews(hooks, REVIEW_PREVIEW_CHARS)
    );
    let reply = gateway
        .invoke(BackendId::Balanced, &prompt, REVIEW_MAX_TOKENS)
        .await
        .into_text_or_empty();

    match parse_review(&reply, hooks.len()) {
        Some(redirect) => {
            debug!(from = current + 1, to = redirect + 1, "Second opinion changed hook");
            redirect
        }
        None => {
            debug!("Second opinion kept hook");
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_hook_strips_numbering() {
        assert_eq!(
            clean_hook("  1. Have you ever wondered why this works? ").as_deref(),
            Some("Have you ever wondered why this works?")
        );
        assert_eq!(clean_hook("too short"), None);
    }

    #[test]
    fn test_clean_hook_measures_length_after_stripping() {
        assert_eq!(clean_hook(&"-".repeat(25)), None);
        assert_eq!(clean_hook("123.-* tiny hook text"), None);
        assert_eq!(
            clean_hook("2. Twenty chars of hook").as_deref(),
            Some("Twenty chars of hook")
        );
    }

    #[test]
    fn test_selection_defaults() {
        assert_eq!(parse_selection("no structure here", 3), (0, 30));
        assert_eq!(parse_selection("BEST: 2\nSCORE: 37", 3), (1, 37));
        assert_eq!(parse_selection("BEST: 9\nSCORE: 12", 3), (2, 12));
        assert_eq!(parse_selection("BEST: 0", 3), (0, 30));
    }

    #[test]
    fn test_review_parsing() {
        assert_eq!(parse_review("KEEP", 3), None);
        assert_eq!(parse_review("change to 3", 3), Some(2));
        assert_eq!(parse_review("CHANGE to 7", 3), Some(2));
        assert_eq!(parse_review("CHANGE, but unsure which", 3), None);
    }

    #[test]
    fn test_prompt_mentions_pattern_only_when_present() {
        let with = hook_prompt("Rust", "urgent and time-sensitive", 100, Some("Secret reveal"));
        assert!(with.contains("- Include pattern: Secret reveal"));
        let without = hook_prompt("Rust", "urgent and time-sensitive", 100, None);
        assert!(!without.contains("Include pattern"));
    }
}
