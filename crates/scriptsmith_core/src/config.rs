//! Layered configuration for Scriptsmith.
//!
//! Configuration is assembled from, in increasing precedence:
//! - Bundled defaults (include_str! from scriptsmith.toml)
//! - `~/.config/scriptsmith/scriptsmith.toml`
//! - `./scriptsmith.toml`
//! - `SCRIPTSMITH__*` environment variables, `__` separating nested keys
//!
//! Credentials are never part of this file; see the model clients.

use crate::{BackendProfiles, TierTable};
use config::{Config, Environment, File, FileFormat};
use scriptsmith_error::{ConfigError, ScriptsmithError, ScriptsmithResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../../../scriptsmith.toml");

/// Chat completions endpoint and attribution headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct OpenRouterSettings {
    /// Chat completions URL.
    endpoint: String,
    /// Value of the `HTTP-Referer` attribution header.
    referer: String,
    /// Value of the `X-Title` attribution header.
    app_title: String,
}

impl Default for OpenRouterSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            referer: "https://github.com/crumplecup/scriptsmith".to_string(),
            app_title: "Scriptsmith".to_string(),
        }
    }
}

/// Web search used for viral research and client research.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ResearchSettings {
    /// Search URL.
    endpoint: String,
    /// Request timeout in seconds.
    timeout_secs: u64,
    /// Results requested per search.
    result_count: u32,
    /// Cost charged to the run ledger per search, in USD.
    cost_per_search: f64,
    /// Country code sent with each search, e.g. `de`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    /// Language code sent with each search, e.g. `de`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    /// Leading hits inspected for viral patterns.
    pattern_scan_limit: usize,
    /// Patterns kept at most.
    max_patterns: usize,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://google.serper.dev/search".to_string(),
            timeout_secs: 10,
            result_count: 10,
            cost_per_search: 0.01,
            country: None,
            language: None,
            pattern_scan_limit: 5,
            max_patterns: 3,
        }
    }
}

/// Plagiarism detection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct OriginalitySettings {
    /// API URL.
    endpoint: String,
    /// Request timeout in seconds.
    timeout_secs: u64,
    /// Match percentage at or above which a check fails.
    match_threshold: f64,
    /// Characters of the script submitted.
    max_chars: usize,
    /// Texts shorter than this are not submitted.
    min_chars: usize,
    /// Matched pages compared in full to obtain a match percentage.
    full_comparisons: u32,
}

impl Default for OriginalitySettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.copyscape.com/api/".to_string(),
            timeout_secs: 30,
            match_threshold: 5.0,
            max_chars: 10_000,
            min_chars: 100,
            full_comparisons: 1,
        }
    }
}

/// Pipeline tuning constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PipelineSettings {
    /// Upper bound on output tokens for any single call.
    output_token_ceiling: u32,
    /// Words a trimmed script may deviate from its target.
    trim_tolerance: usize,
    /// Factor the clamped target is inflated by before planning.
    target_inflation: f64,
    /// Hook scores below this trigger a second opinion.
    second_opinion_threshold: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            output_token_ceiling: 32_000,
            trim_tolerance: 50,
            target_inflation: 1.15,
            second_opinion_threshold: 35,
        }
    }
}

/// Top-level Scriptsmith configuration.
///
/// `Default` yields the bundled values, so library users and tests need
/// no files on disk.
///
/// # Example
///
/// ```no_run
/// use scriptsmith_core::{QualityTier, ScriptsmithConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScriptsmithConfig::load()?;
/// let high = config.tiers().get(QualityTier::High);
/// println!("High tier budget: {}", high.budget_label());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ScriptsmithConfig {
    /// Tier table.
    #[serde(default)]
    tiers: TierTable,
    /// Backend profiles.
    #[serde(default)]
    backends: BackendProfiles,
    /// Chat completions endpoint.
    #[serde(default)]
    openrouter: OpenRouterSettings,
    /// Web search.
    #[serde(default)]
    research: ResearchSettings,
    /// Plagiarism detection.
    #[serde(default)]
    originality: OriginalitySettings,
    /// Pipeline tuning.
    #[serde(default)]
    pipeline: PipelineSettings,
}

impl ScriptsmithConfig {
    /// Load configuration from a specific file path, layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ScriptsmithResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ScriptsmithError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?;

        Self::deserialize_from(config)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file or variable cannot be parsed.
    #[instrument]
    pub fn load() -> ScriptsmithResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scriptsmith/scriptsmith.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("scriptsmith").required(false))
            .add_source(
                Environment::with_prefix("SCRIPTSMITH")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build().map_err(|e| {
            ScriptsmithError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?;

        Self::deserialize_from(config)
    }

    fn deserialize_from(config: Config) -> ScriptsmithResult<Self> {
        config.try_deserialize().map_err(|e| {
            ScriptsmithError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendId, QualityTier};

    fn bundled() -> ScriptsmithConfig {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_bundled_matches_default() {
        assert_eq!(bundled(), ScriptsmithConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_values() {
        let config: ScriptsmithConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(
                "[pipeline]\ntrim_tolerance = 25\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(*config.pipeline().trim_tolerance(), 25);
        assert_eq!(*config.pipeline().output_token_ceiling(), 32_000);
        assert_eq!(*config.tiers().get(QualityTier::High).hook_count(), 7);
        assert_eq!(
            config.backends().get(BackendId::Fast).model(),
            "google/gemini-2.5-pro"
        );
    }
}
