//! Block classification: raw text to typed, wrapped lines.

use crate::measure::TextMeasurer;
use crate::settings::Settings;
use crate::types::{ClassifiedLine, HeadingLevel};
use crate::wrap::wrap_text;

/// Kind of a single trimmed source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Heading(HeadingLevel, &'a str),
    Quote(&'a str),
    List(&'a str),
    Body(&'a str),
    Blank,
}

/// Classify one trimmed line by its markdown prefix, in priority order.
fn line_kind(trimmed: &str) -> LineKind<'_> {
    if let Some(rest) = trimmed.strip_prefix("### ") {
        LineKind::Heading(HeadingLevel::H3, rest)
    } else if let Some(rest) = trimmed.strip_prefix("## ") {
        LineKind::Heading(HeadingLevel::H2, rest)
    } else if let Some(rest) = trimmed.strip_prefix("# ") {
        LineKind::Heading(HeadingLevel::H1, rest)
    } else if let Some(rest) = trimmed.strip_prefix("> ") {
        LineKind::Quote(rest)
    } else if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        LineKind::List(rest)
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Body(trimmed)
    }
}

/// Split raw text into classified lines.
///
/// Body and list paragraphs are wrapped to the content width (less the
/// bullet prefix when bullets are enabled) and followed by one spacer.
/// Headings and quotes are kept whole. Blank lines are dropped.
pub fn classify(
    raw_text: &str,
    settings: &Settings,
    measurer: &dyn TextMeasurer,
) -> Vec<ClassifiedLine> {
    let font = settings.body_font();
    let measure = |s: &str| measurer.measure_text_px(s, &font);

    let show_bullets = settings.use_bullets && !settings.bullet_char.is_empty();
    let bullet_width = if show_bullets {
        measure(&format!("{} ", settings.bullet_char))
    } else {
        0.0
    };
    let effective_width = settings.content_width() - bullet_width;

    let mut lines = Vec::new();

    for raw in raw_text.lines() {
        match line_kind(raw.trim()) {
            LineKind::Heading(level, text) => lines.push(ClassifiedLine::Heading {
                text: text.to_string(),
                level,
            }),
            LineKind::Quote(text) => lines.push(ClassifiedLine::Quote {
                text: text.to_string(),
            }),
            LineKind::List(text) => {
                let wrapped = wrap_text(text, effective_width, measure);
                for (idx, sub) in wrapped.into_iter().enumerate() {
                    lines.push(ClassifiedLine::ListItem {
                        text: sub,
                        is_first_of_paragraph: idx == 0,
                        use_bullet: show_bullets && idx == 0,
                    });
                }
                lines.push(ClassifiedLine::Spacer);
            }
            LineKind::Body(text) => {
                let wrapped = wrap_text(text, effective_width, measure);
                for (idx, sub) in wrapped.into_iter().enumerate() {
                    lines.push(ClassifiedLine::Body {
                        text: sub,
                        is_first_of_paragraph: idx == 0,
                        use_bullet: show_bullets && idx == 0,
                    });
                }
                lines.push(ClassifiedLine::Spacer);
            }
            LineKind::Blank => {}
        }
    }

    log::debug!("classified {} lines", lines.len());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::AdvanceWidthMeasurer;

    fn body(text: &str, first: bool, bullet: bool) -> ClassifiedLine {
        ClassifiedLine::Body {
            text: text.to_string(),
            is_first_of_paragraph: first,
            use_bullet: bullet,
        }
    }

    #[test]
    fn test_prefix_priority() {
        assert_eq!(line_kind("### a"), LineKind::Heading(HeadingLevel::H3, "a"));
        assert_eq!(line_kind("## a"), LineKind::Heading(HeadingLevel::H2, "a"));
        assert_eq!(line_kind("# a"), LineKind::Heading(HeadingLevel::H1, "a"));
        assert_eq!(line_kind("> a"), LineKind::Quote("a"));
        assert_eq!(line_kind("- a"), LineKind::List("a"));
        assert_eq!(line_kind("* a"), LineKind::List("a"));
        assert_eq!(line_kind(""), LineKind::Blank);
        // no space after the marker means plain body text
        assert_eq!(line_kind("#tag"), LineKind::Body("#tag"));
        assert_eq!(line_kind("**bold** start"), LineKind::Body("**bold** start"));
    }

    #[test]
    fn test_heading_and_body_paragraphs() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let lines = classify("# Title\nBody line one\nBody line two", &settings, &measurer);

        assert_eq!(
            lines,
            vec![
                ClassifiedLine::Heading {
                    text: "Title".to_string(),
                    level: HeadingLevel::H1,
                },
                body("Body line one", true, false),
                ClassifiedLine::Spacer,
                body("Body line two", true, false),
                ClassifiedLine::Spacer,
            ]
        );
    }

    #[test]
    fn test_blank_lines_dropped_and_quotes_have_no_spacer() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let lines = classify("\n\n> wisdom\n   \n", &settings, &measurer);
        assert_eq!(
            lines,
            vec![ClassifiedLine::Quote {
                text: "wisdom".to_string()
            }]
        );
    }

    #[test]
    fn test_bullets_once_per_paragraph() {
        let settings = Settings {
            use_bullets: true,
            bullet_char: "✅".to_string(),
            ..Settings::default()
        };
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let lines = classify("- item one\n- item two", &settings, &measurer);

        let items: Vec<_> = lines
            .iter()
            .filter(|l| matches!(l, ClassifiedLine::ListItem { .. }))
            .collect();
        assert_eq!(items.len(), 2);
        for item in items {
            assert!(matches!(
                item,
                ClassifiedLine::ListItem {
                    is_first_of_paragraph: true,
                    use_bullet: true,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_wrapped_paragraph_marks_only_first_line() {
        let settings = Settings {
            use_bullets: true,
            ..Settings::default()
        };
        // 15px per char: "• " costs 30px, leaving 870px = 58 chars
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let text = "word ".repeat(40);
        let lines = classify(&text, &settings, &measurer);

        let bodies: Vec<_> = lines
            .iter()
            .filter_map(|l| match l {
                ClassifiedLine::Body {
                    text,
                    is_first_of_paragraph,
                    use_bullet,
                } => Some((text.clone(), *is_first_of_paragraph, *use_bullet)),
                _ => None,
            })
            .collect();

        assert!(bodies.len() > 1);
        assert!(bodies[0].1 && bodies[0].2);
        assert!(bodies[1..].iter().all(|(_, first, bullet)| !first && !bullet));
        assert!(bodies.iter().all(|(t, _, _)| t.chars().count() <= 58));
        assert_eq!(lines.last(), Some(&ClassifiedLine::Spacer));
    }

    #[test]
    fn test_empty_bullet_char_shows_no_bullet() {
        let settings = Settings {
            use_bullets: true,
            bullet_char: String::new(),
            ..Settings::default()
        };
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let lines = classify("- item
body", &settings, &measurer);

        assert!(lines.iter().all(|l| !l.shows_bullet()));
        assert_eq!(
            lines[0],
            ClassifiedLine::ListItem {
                text: "item".to_string(),
                is_first_of_paragraph: true,
                use_bullet: false,
            }
        );
    }
}
