//! Quality tiers and their fixed feature/budget configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Target quality tier of a generation run.
///
/// Parses case-insensitively from the canonical names, the legacy internal
/// names (`mittel`, `highend`) and the localized customer-facing names
/// (`bronze`, `silver`/`silber`, `gold`).
///
/// # Examples
///
/// ```
/// use scriptsmith_core::QualityTier;
///
/// assert_eq!("gold".parse::<QualityTier>().unwrap(), QualityTier::High);
/// assert_eq!("Mittel".parse::<QualityTier>().unwrap(), QualityTier::Medium);
/// assert_eq!(QualityTier::Low.to_string(), "low");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum QualityTier {
    /// Cheapest tier: three hooks, one polish pass.
    #[default]
    #[strum(to_string = "low", serialize = "bronze")]
    Low,
    /// Adds A/B testing and the originality check.
    #[strum(to_string = "medium", serialize = "mittel", serialize = "silver", serialize = "silber")]
    Medium,
    /// Everything: viral research, three polish passes, bonus content.
    #[serde(alias = "highend")]
    #[strum(to_string = "high", serialize = "highend", serialize = "gold")]
    High,
}

impl QualityTier {
    /// Resolve a loosely-specified tier name, falling back to [`QualityTier::Low`].
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptsmith_core::QualityTier;
    ///
    /// assert_eq!(QualityTier::from_loose("silver"), QualityTier::Medium);
    /// assert_eq!(QualityTier::from_loose("platinum"), QualityTier::Low);
    /// ```
    pub fn from_loose(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }
}

/// Per-tier constants: budget, call counts and feature flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    /// Budgeted cost ceiling in USD.
    budget_ceiling: f64,
    /// Number of hook candidates to generate.
    hook_count: u32,
    /// Number of polish passes over the assembled sections.
    polish_pass_count: u32,
    /// Escalate low hook scores and run the quality gate.
    enable_second_opinion: bool,
    /// Generate two section sets and keep the better one.
    enable_ab_testing: bool,
    /// Harvest viral patterns from web search.
    enable_viral_research: bool,
    /// Run the originality check on the assembled script.
    enable_originality_check: bool,
    /// Generate thumbnail ideas and a video description.
    enable_bonus_content: bool,
    /// Advertised quality score for this tier.
    target_quality_score: f64,
}

impl TierConfig {
    /// The advertised score as shown to customers, e.g. `"9.1"`.
    pub fn quality_score_label(&self) -> String {
        format!("{:.1}", self.target_quality_score)
    }

    /// The budget ceiling formatted as dollars, e.g. `"$0.35"`.
    pub fn budget_label(&self) -> String {
        format!("${:.2}", self.budget_ceiling)
    }
}

/// The fixed three-entry tier table.
///
/// One field per tier, so a lookup can never miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct TierTable {
    /// Configuration for [`QualityTier::Low`].
    low: TierConfig,
    /// Configuration for [`QualityTier::Medium`].
    medium: TierConfig,
    /// Configuration for [`QualityTier::High`].
    high: TierConfig,
}

impl TierTable {
    /// Configuration for the given tier.
    pub fn get(&self, tier: QualityTier) -> &TierConfig {
        match tier {
            QualityTier::Low => &self.low,
            QualityTier::Medium => &self.medium,
            QualityTier::High => &self.high,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            low: TierConfig {
                budget_ceiling: 0.35,
                hook_count: 3,
                polish_pass_count: 1,
                enable_second_opinion: true,
                enable_ab_testing: false,
                enable_viral_research: false,
                enable_originality_check: false,
                enable_bonus_content: false,
                target_quality_score: 9.1,
            },
            medium: TierConfig {
                budget_ceiling: 0.63,
                hook_count: 5,
                polish_pass_count: 2,
                enable_second_opinion: true,
                enable_ab_testing: true,
                enable_viral_research: false,
                enable_originality_check: true,
                enable_bonus_content: false,
                target_quality_score: 9.5,
            },
            high: TierConfig {
                budget_ceiling: 0.93,
                hook_count: 7,
                polish_pass_count: 3,
                enable_second_opinion: true,
                enable_ab_testing: true,
                enable_viral_research: true,
                enable_originality_check: true,
                enable_bonus_content: true,
                target_quality_score: 9.8,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_localized_names_map_to_tiers() {
        assert_eq!(QualityTier::from_loose("bronze"), QualityTier::Low);
        assert_eq!(QualityTier::from_loose("SILBER"), QualityTier::Medium);
        assert_eq!(QualityTier::from_loose("gold"), QualityTier::High);
        assert_eq!(QualityTier::from_loose("highend"), QualityTier::High);
        assert_eq!(QualityTier::from_loose(""), QualityTier::Low);
    }

    #[test]
    fn test_display_is_canonical() {
        let names: Vec<String> = QualityTier::iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["low", "medium", "high"]);
    }

    #[test]
    fn test_default_table_features_grow_with_tier() {
        let table = TierTable::default();
        let mut last_hooks = 0;
        for tier in QualityTier::iter() {
            let config = table.get(tier);
            assert!(*config.hook_count() > last_hooks);
            last_hooks = *config.hook_count();
        }
        assert!(!*table.get(QualityTier::Low).enable_ab_testing());
        assert!(*table.get(QualityTier::High).enable_bonus_content());
        assert_eq!(table.get(QualityTier::Low).quality_score_label(), "9.1");
        assert_eq!(table.get(QualityTier::Medium).budget_label(), "$0.63");
    }
}
