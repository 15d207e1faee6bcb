//! Deck statistics: word count, reading time and heading outline.

use crate::types::HeadingLevel;
use serde::{Deserialize, Serialize};

/// Reading speed used for time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Role of a heading in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineKind {
    Chapter,
    Section,
    Slide,
}

impl From<HeadingLevel> for OutlineKind {
    fn from(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => Self::Chapter,
            HeadingLevel::H2 => Self::Section,
            HeadingLevel::H3 => Self::Slide,
        }
    }
}

/// One heading of the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub kind: OutlineKind,
    pub text: String,
}

/// Summary of a generated deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    pub word_count: usize,
    /// Estimated minutes, rounded up.
    pub reading_time_minutes: usize,
    pub slide_count: usize,
    pub has_title: bool,
    pub has_images: bool,
    pub outline: Vec<OutlineEntry>,
}

/// Number of whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `text` at `words_per_minute`, rounded up.
pub fn estimate_reading_time(text: &str, words_per_minute: usize) -> usize {
    count_words(text).div_ceil(words_per_minute.max(1))
}

/// Headings of the source text in document order.
pub fn extract_outline(text: &str) -> Vec<OutlineEntry> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let (level, rest) = if let Some(rest) = trimmed.strip_prefix("### ") {
                (HeadingLevel::H3, rest)
            } else if let Some(rest) = trimmed.strip_prefix("## ") {
                (HeadingLevel::H2, rest)
            } else if let Some(rest) = trimmed.strip_prefix("# ") {
                (HeadingLevel::H1, rest)
            } else {
                return None;
            };
            Some(OutlineEntry {
                level,
                kind: level.into(),
                text: rest.to_string(),
            })
        })
        .collect()
}
