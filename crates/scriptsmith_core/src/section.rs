//! Script sections, section sets and per-section word targets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count whitespace-separated words.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::word_count;
///
/// assert_eq!(word_count("  one two\nthree "), 3);
/// assert_eq!(word_count(""), 0);
/// ```
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A named part of a script.
///
/// Ordering follows the reading order of the finished script.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Section {
    /// Opening hook.
    #[serde(rename = "hook")]
    #[strum(to_string = "hook")]
    Hook,
    /// Introduction.
    #[serde(rename = "intro")]
    #[strum(to_string = "intro")]
    Intro,
    /// Four key points.
    #[serde(rename = "key_points")]
    #[strum(to_string = "key_points")]
    KeyPoints,
    /// Chapter 1, the problem.
    #[serde(rename = "chapter_1")]
    #[strum(to_string = "chapter_1")]
    Chapter1,
    /// Chapter 2, the solution.
    #[serde(rename = "chapter_2")]
    #[strum(to_string = "chapter_2")]
    Chapter2,
    /// Chapter 3, implementation.
    #[serde(rename = "chapter_3")]
    #[strum(to_string = "chapter_3")]
    Chapter3,
    /// Conclusion.
    #[serde(rename = "conclusion")]
    #[strum(to_string = "conclusion")]
    Conclusion,
}

impl Section {
    /// The six sections produced by the section generator, in order.
    pub const BODY: [Section; 6] = [
        Section::Intro,
        Section::KeyPoints,
        Section::Chapter1,
        Section::Chapter2,
        Section::Chapter3,
        Section::Conclusion,
    ];

    /// Snake-case key used in maps and serialized output.
    pub fn key(self) -> &'static str {
        match self {
            Section::Hook => "hook",
            Section::Intro => "intro",
            Section::KeyPoints => "key_points",
            Section::Chapter1 => "chapter_1",
            Section::Chapter2 => "chapter_2",
            Section::Chapter3 => "chapter_3",
            Section::Conclusion => "conclusion",
        }
    }

    /// Delimiter marker used in prompts and responses, e.g. `[INTRO]...[/INTRO]`.
    pub fn marker(self) -> &'static str {
        match self {
            Section::Hook => "HOOK",
            Section::Intro => "INTRO",
            Section::KeyPoints => "KEYPOINTS",
            Section::Chapter1 => "CHAPTER1",
            Section::Chapter2 => "CHAPTER2",
            Section::Chapter3 => "CHAPTER3",
            Section::Conclusion => "CONCLUSION",
        }
    }
}

/// Ordered mapping of section to text.
///
/// Stages never mutate a set they were handed; they build a new one.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::{Section, SectionSet};
///
/// let sections = SectionSet::new()
///     .with(Section::Intro, "Hello there")
///     .with(Section::Conclusion, "");
///
/// assert_eq!(sections.get(Section::Intro), "Hello there");
/// assert_eq!(sections.total_words(), 2);
/// assert_eq!(sections.without_empty().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionSet(BTreeMap<Section, String>);

impl SectionSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this set with `section` set to `text`.
    pub fn with(mut self, section: Section, text: impl Into<String>) -> Self {
        self.0.insert(section, text.into());
        self
    }

    /// Set `section` to `text`.
    pub fn insert(&mut self, section: Section, text: impl Into<String>) {
        self.0.insert(section, text.into());
    }

    /// Text of a section, empty when absent.
    pub fn get(&self, section: Section) -> &str {
        self.0.get(&section).map(String::as_str).unwrap_or("")
    }

    /// Whether the section is present (possibly empty).
    pub fn contains(&self, section: Section) -> bool {
        self.0.contains_key(&section)
    }

    /// Sections in reading order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        self.0.iter().map(|(section, text)| (*section, text.as_str()))
    }

    /// Number of sections present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no section is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Word count of one section.
    pub fn words_in(&self, section: Section) -> usize {
        word_count(self.get(section))
    }

    /// Word count over all sections.
    pub fn total_words(&self) -> usize {
        self.0.values().map(|text| word_count(text)).sum()
    }

    /// A copy with sections holding only whitespace removed.
    pub fn without_empty(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, text)| !text.trim().is_empty())
                .map(|(section, text)| (*section, text.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(Section, String)> for SectionSet {
    fn from_iter<I: IntoIterator<Item = (Section, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Word targets per section, produced by the planner.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct WordDistribution {
    /// Hook target.
    pub(crate) hook: u32,
    /// Introduction target.
    pub(crate) intro: u32,
    /// Key points target.
    pub(crate) key_points: u32,
    /// Chapter 1 target.
    pub(crate) chapter_1: u32,
    /// Chapter 2 target.
    pub(crate) chapter_2: u32,
    /// Chapter 3 target.
    pub(crate) chapter_3: u32,
    /// Conclusion target.
    pub(crate) conclusion: u32,
}

impl WordDistribution {
    /// Target for one section.
    pub fn target(&self, section: Section) -> u32 {
        match section {
            Section::Hook => self.hook,
            Section::Intro => self.intro,
            Section::KeyPoints => self.key_points,
            Section::Chapter1 => self.chapter_1,
            Section::Chapter2 => self.chapter_2,
            Section::Chapter3 => self.chapter_3,
            Section::Conclusion => self.conclusion,
        }
    }

    /// Sum over every section including the hook.
    pub fn total(&self) -> u32 {
        self.hook + self.body_total()
    }

    /// Sum over the six body sections.
    pub fn body_total(&self) -> u32 {
        Section::BODY.iter().map(|s| self.target(*s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_markers_are_unique() {
        let mut markers: Vec<&str> = Section::iter().map(Section::marker).collect();
        markers.sort_unstable();
        markers.dedup();
        assert_eq!(markers.len(), 7);
    }

    #[test]
    fn test_iteration_follows_reading_order() {
        let set = SectionSet::new()
            .with(Section::Conclusion, "c")
            .with(Section::Intro, "i")
            .with(Section::Chapter2, "two");
        let order: Vec<Section> = set.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![Section::Intro, Section::Chapter2, Section::Conclusion]);
    }

    #[test]
    fn test_serializes_with_snake_case_keys() {
        let set = SectionSet::new().with(Section::KeyPoints, "k");
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"key_points":"k"}"#);
    }

    #[test]
    fn test_display_matches_key() {
        for section in Section::iter() {
            assert_eq!(section.to_string(), section.key());
        }
    }
}
