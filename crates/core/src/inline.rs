//! Inline markdown span parsing.
//!
//! Recognises six independent span patterns (`**bold**`, `*italic*`,
//! `__underline__`, `~~strikethrough~~`, `` `code` `` and `==highlight==`)
//! and splits a line into [`StyledRun`]s. Spans never nest: every run carries
//! at most one style. Unmatched delimiters stay in the output as literal text.

use crate::types::{InlineStyle, StyledRun};
use regex::Regex;
use std::sync::LazyLock;

static BOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

/// Single-star span. The "not next to another star" rule is checked by hand
/// since the regex crate has no lookaround.
static ITALIC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

static UNDERLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());

static STRIKETHROUGH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~]+)~~").unwrap());

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static HIGHLIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"==([^=]+)==").unwrap());

/// A located span: byte range of the whole match and of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanMatch {
    style: InlineStyle,
    start: usize,
    end: usize,
    content_start: usize,
    content_end: usize,
}

impl SpanMatch {
    fn overlaps(&self, other: &SpanMatch) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Tie-break order when two spans start at the same offset.
fn priority(style: InlineStyle) -> u8 {
    match style {
        InlineStyle::Bold => 0,
        InlineStyle::Italic => 1,
        InlineStyle::Underline => 2,
        InlineStyle::Strikethrough => 3,
        InlineStyle::Code => 4,
        InlineStyle::Highlight => 5,
    }
}

fn find_spans(regex: &Regex, style: InlineStyle, text: &str) -> Vec<SpanMatch> {
    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let content = caps.get(1)?;
            Some(SpanMatch {
                style,
                start: whole.start(),
                end: whole.end(),
                content_start: content.start(),
                content_end: content.end(),
            })
        })
        .collect()
}

/// Italic spans whose delimiters are not adjacent to another `*`.
fn find_italic_spans(text: &str) -> Vec<SpanMatch> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(caps) = ITALIC_REGEX.captures_at(text, pos) {
        let (Some(whole), Some(content)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let star_before = whole.start() > 0 && bytes[whole.start() - 1] == b'*';
        let star_after = bytes.get(whole.end()) == Some(&b'*');

        if star_before || star_after {
            // `*` is one byte, so the next offset is a char boundary
            pos = whole.start() + 1;
            continue;
        }

        spans.push(SpanMatch {
            style: InlineStyle::Italic,
            start: whole.start(),
            end: whole.end(),
            content_start: content.start(),
            content_end: content.end(),
        });
        pos = whole.end();
    }

    spans
}

/// Parse inline markdown into styled runs.
///
/// Italic spans overlapping any bold span are discarded. Remaining spans are
/// ordered by start offset, then by style priority (bold, italic, underline,
/// strikethrough, code, highlight); a span starting inside an already emitted
/// span is dropped.
pub fn parse_inline(text: &str) -> Vec<StyledRun> {
    if text.is_empty() {
        return Vec::new();
    }

    let bold = find_spans(&BOLD_REGEX, InlineStyle::Bold, text);
    let italic: Vec<SpanMatch> = find_italic_spans(text)
        .into_iter()
        .filter(|it| !bold.iter().any(|b| it.overlaps(b)))
        .collect();

    let mut spans = bold;
    spans.extend(italic);
    spans.extend(find_spans(&UNDERLINE_REGEX, InlineStyle::Underline, text));
    spans.extend(find_spans(
        &STRIKETHROUGH_REGEX,
        InlineStyle::Strikethrough,
        text,
    ));
    spans.extend(find_spans(&CODE_REGEX, InlineStyle::Code, text));
    spans.extend(find_spans(&HIGHLIGHT_REGEX, InlineStyle::Highlight, text));
    spans.sort_by_key(|s| (s.start, priority(s.style)));

    let mut runs = Vec::new();
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor {
            log::trace!("dropping overlapping {:?} span at {}", span.style, span.start);
            continue;
        }
        if span.start > cursor {
            runs.push(StyledRun::plain(&text[cursor..span.start]));
        }
        runs.push(StyledRun::styled(
            &text[span.content_start..span.content_end],
            span.style,
        ));
        cursor = span.end;
    }

    if cursor < text.len() {
        runs.push(StyledRun::plain(&text[cursor..]));
    }

    runs
}

/// Text of all runs concatenated, i.e. the input with delimiters removed.
pub fn plain_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
