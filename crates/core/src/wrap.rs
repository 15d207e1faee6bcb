//! Greedy word wrapping against a measured width.

/// Wrap `text` into lines no wider than `max_width_px` where possible.
///
/// Words are split on whitespace runs and re-joined with single spaces. A
/// word that is wider than `max_width_px` on its own is emitted as its own
/// overflowing line; words are never broken.
pub fn wrap_text<F>(text: &str, max_width_px: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if measure(&candidate) > max_width_px && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    for line in &lines {
        if !line.contains(' ') && measure(line) > max_width_px {
            log::warn!(
                "word {:?} is wider than the available {:.0}px and will overflow",
                line,
                max_width_px
            );
        }
    }

    lines
}
