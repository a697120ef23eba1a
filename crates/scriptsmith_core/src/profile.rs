//! Backend identities and their call profiles.

use serde::{Deserialize, Serialize};

/// The three model roles a run draws on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BackendId {
    /// Cheap creative model used for hooks.
    Fast,
    /// Mid-priced reviewer used for second opinions and quality gates.
    Balanced,
    /// Expensive model that writes and polishes the script.
    Premium,
}

/// Model binding, sampling defaults and pricing of one backend.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::{BackendId, BackendProfiles};
///
/// let profiles = BackendProfiles::default();
/// let premium = profiles.get(BackendId::Premium);
///
/// // 4 prompt words, 100 output tokens
/// let cost = premium.estimate_cost("one two three four", 100);
/// assert!((cost - (4.0 * 0.000015 + 100.0 * 0.000075)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct BackendProfile {
    /// Provider model identifier.
    model: String,
    /// Sampling temperature.
    temperature: f32,
    /// Per-request timeout in seconds.
    timeout_secs: u64,
    /// Fixed cost per call in USD.
    #[serde(default)]
    flat_cost: f64,
    /// Cost per whitespace-separated prompt word in USD.
    #[serde(default)]
    prompt_word_cost: f64,
    /// Cost per requested output token in USD.
    #[serde(default)]
    output_token_cost: f64,
}

impl BackendProfile {
    /// Estimated cost of a call, charged before it is made.
    pub fn estimate_cost(&self, prompt: &str, max_tokens: u32) -> f64 {
        let prompt_words = prompt.split_whitespace().count() as f64;
        self.flat_cost
            + prompt_words * self.prompt_word_cost
            + f64::from(max_tokens) * self.output_token_cost
    }
}

/// One profile per backend identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct BackendProfiles {
    /// Hook writer.
    fast: BackendProfile,
    /// Reviewer.
    balanced: BackendProfile,
    /// Main writer.
    premium: BackendProfile,
}

impl BackendProfiles {
    /// Profile bound to `id`.
    pub fn get(&self, id: BackendId) -> &BackendProfile {
        match id {
            BackendId::Fast => &self.fast,
            BackendId::Balanced => &self.balanced,
            BackendId::Premium => &self.premium,
        }
    }
}

impl Default for BackendProfiles {
    fn default() -> Self {
        Self {
            fast: BackendProfile {
                model: "google/gemini-2.5-pro".to_string(),
                temperature: 0.8,
                timeout_secs: 30,
                flat_cost: 0.001,
                prompt_word_cost: 0.0,
                output_token_cost: 0.0,
            },
            balanced: BackendProfile {
                model: "anthropic/claude-sonnet-4".to_string(),
                temperature: 0.3,
                timeout_secs: 30,
                flat_cost: 0.0,
                prompt_word_cost: 0.000003,
                output_token_cost: 0.000015,
            },
            premium: BackendProfile {
                model: "anthropic/claude-opus-4.1".to_string(),
                temperature: 0.7,
                timeout_secs: 60,
                flat_cost: 0.0,
                prompt_word_cost: 0.000015,
                output_token_cost: 0.000075,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_is_flat_rate() {
        let profiles = BackendProfiles::default();
        let fast = profiles.get(BackendId::Fast);
        assert_eq!(fast.estimate_cost("a b c", 10), 0.001);
        assert_eq!(fast.estimate_cost(&"word ".repeat(500), 4000), 0.001);
    }

    #[test]
    fn test_balanced_scales_with_prompt_and_tokens() {
        let profiles = BackendProfiles::default();
        let balanced = profiles.get(BackendId::Balanced);
        let cost = balanced.estimate_cost("ten words here and there and some more words now", 200);
        assert!((cost - (10.0 * 0.000003 + 200.0 * 0.000015)).abs() < 1e-12);
    }

    #[test]
    fn test_backend_id_names() {
        assert_eq!(BackendId::Premium.to_string(), "premium");
        assert_eq!("FAST".parse::<BackendId>().unwrap(), BackendId::Fast);
    }
}
