//! Greedy pagination of classified lines into fixed-height pages.

use crate::settings::Settings;
use crate::types::{ClassifiedLine, Page};

/// Vertical space a line occupies, in pixels.
pub fn line_height(line: &ClassifiedLine, settings: &Settings) -> f32 {
    let size = settings.font_size;
    let lhm = settings.line_height_multiplier;
    match line {
        ClassifiedLine::Heading { level, .. } => size * level.scale() * lhm,
        ClassifiedLine::Quote { .. } => size * 1.1 * lhm,
        ClassifiedLine::Spacer => size * 0.5,
        ClassifiedLine::Body { .. } | ClassifiedLine::ListItem { .. } => size * lhm,
    }
}

/// Pack lines into content pages.
///
/// A level-3 heading always opens a new page. Otherwise a line moves to a new
/// page when it would push the cursor past the content budget and the
/// current page already holds something. A single line taller than the
/// budget is kept whole on its own page.
pub fn paginate(lines: &[ClassifiedLine], settings: &Settings) -> Vec<Page> {
    let max_content_height = settings.max_content_height();
    let mut pages = Vec::new();
    let mut current: Vec<ClassifiedLine> = Vec::new();
    let mut cursor = settings.padding;

    for line in lines {
        let height = line_height(line, settings);

        if line.is_forced_break() {
            if !current.is_empty() {
                pages.push(Page::Content(std::mem::take(&mut current)));
            }
            current.push(line.clone());
            cursor = settings.padding + height;
            continue;
        }

        if cursor + height > max_content_height && !current.is_empty() {
            pages.push(Page::Content(std::mem::take(&mut current)));
            current.push(line.clone());
            cursor = settings.padding + height;
        } else {
            current.push(line.clone());
            cursor += height;
        }

        if current.len() == 1 && cursor > max_content_height {
            log::warn!(
                "line of height {:.0}px exceeds the page budget of {:.0}px",
                height,
                max_content_height - settings.padding
            );
        }
    }

    if !current.is_empty() {
        pages.push(Page::Content(current));
    }

    log::debug!("paginated {} lines into {} pages", lines.len(), pages.len());
    pages
}
