//! Domain types for classified content, pages and decks.

use serde::{Deserialize, Serialize};

/// The single inline style a run can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Highlight,
}

/// A contiguous span of text sharing one formatting flag (or none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    /// Text with markdown delimiters removed.
    pub text: String,

    /// Formatting applied to the whole run. `None` for plain text.
    pub style: Option<InlineStyle>,
}

impl StyledRun {
    /// Create an unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Create a run carrying one style.
    pub fn styled(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Whether this run carries the given style.
    pub fn has(&self, style: InlineStyle) -> bool {
        self.style == Some(style)
    }

    /// Whether this run carries no formatting.
    pub fn is_plain(&self) -> bool {
        self.style.is_none()
    }
}

/// Heading depth recognised by the block classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// `# ` chapter heading.
    H1,
    /// `## ` section heading.
    H2,
    /// `### ` slide heading, which always opens a new page.
    H3,
}

impl HeadingLevel {
    /// Numeric level (1..=3).
    pub fn number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }

    /// Font-size multiplier relative to the base font size.
    pub fn scale(self) -> f32 {
        match self {
            Self::H1 => 1.5,
            Self::H2 => 1.3,
            Self::H3 => 1.2,
        }
    }
}

/// One semantic unit of content after wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedLine {
    Heading {
        text: String,
        level: HeadingLevel,
    },
    Quote {
        text: String,
    },
    ListItem {
        text: String,
        is_first_of_paragraph: bool,
        use_bullet: bool,
    },
    Body {
        text: String,
        is_first_of_paragraph: bool,
        use_bullet: bool,
    },
    Spacer,
}

impl ClassifiedLine {
    /// Text carried by the line, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Heading { text, .. }
            | Self::Quote { text }
            | Self::ListItem { text, .. }
            | Self::Body { text, .. } => Some(text),
            Self::Spacer => None,
        }
    }

    /// Whether this line forces a page break before itself.
    pub fn is_forced_break(&self) -> bool {
        matches!(
            self,
            Self::Heading {
                level: HeadingLevel::H3,
                ..
            }
        )
    }

    /// Whether a bullet prefix is drawn in front of this line.
    pub fn shows_bullet(&self) -> bool {
        match self {
            Self::ListItem { use_bullet, .. } | Self::Body { use_bullet, .. } => *use_bullet,
            _ => false,
        }
    }
}

/// One slide worth of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
pub enum Page {
    /// Synthetic leading page drawn from the title/subtitle settings.
    Title,
    /// Paginated content lines, never empty.
    Content(Vec<ClassifiedLine>),
}

impl Page {
    /// Lines on this page. Empty for the title page.
    pub fn lines(&self) -> &[ClassifiedLine] {
        match self {
            Self::Title => &[],
            Self::Content(lines) => lines,
        }
    }

    /// Whether this is the synthetic title page.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title)
    }
}

/// Ordered pages; index order is final slide order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub pages: Vec<Page>,
}

impl Deck {
    /// Create a deck from already ordered pages.
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Number of slides, including the title page.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether index 0 is the synthetic title page.
    pub fn has_title_page(&self) -> bool {
        self.pages.first().is_some_and(Page::is_title)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Pages that carry classified lines.
    pub fn content_pages(&self) -> impl Iterator<Item = &[ClassifiedLine]> {
        self.pages.iter().filter(|p| !p.is_title()).map(Page::lines)
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_level_three_forces_break() {
        let h3 = ClassifiedLine::Heading {
            text: "Slide".to_string(),
            level: HeadingLevel::H3,
        };
        let h2 = ClassifiedLine::Heading {
            text: "Section".to_string(),
            level: HeadingLevel::H2,
        };
        assert!(h3.is_forced_break());
        assert!(!h2.is_forced_break());
        assert!(!ClassifiedLine::Spacer.is_forced_break());
    }

    #[test]
    fn test_line_text() {
        let body = ClassifiedLine::Body {
            text: "hello".to_string(),
            is_first_of_paragraph: true,
            use_bullet: false,
        };
        assert_eq!(body.text(), Some("hello"));
        assert_eq!(ClassifiedLine::Spacer.text(), None);
    }

    #[test]
    fn test_deck_title_page_detection() {
        let deck = Deck::new(vec![Page::Title, Page::Content(vec![ClassifiedLine::Spacer])]);
        assert!(deck.has_title_page());
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.content_pages().count(), 1);

        let untitled = Deck::new(vec![Page::Content(vec![ClassifiedLine::Spacer])]);
        assert!(!untitled.has_title_page());
        assert!(Deck::default().is_empty());
    }

    #[test]
    fn test_page_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Page::Title).unwrap();
        assert_eq!(json, r#"{"kind":"title"}"#);
    }
}
