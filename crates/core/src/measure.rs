//! Text measurement capability consumed by wrapping and rendering.
//!
//! The core never rasterises glyphs itself. Callers inject a [`TextMeasurer`]
//! backed by whatever actually draws the slides (a canvas `measureText`, a
//! font rasteriser, ...). [`AdvanceWidthMeasurer`] is a deterministic stand-in
//! for shells and tests without real font metrics.

use serde::{Deserialize, Serialize};

/// Default font family of the slide renderer.
pub const DEFAULT_FONT_FAMILY: &str = "Vazirmatn";

/// Font selection used for one measurement or draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f32,
    pub bold: bool,
    pub italic: bool,
    /// Use a monospace face (inline code).
    pub monospace: bool,
}

impl FontDescriptor {
    /// Regular weight, upright face.
    pub fn regular(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
            bold: false,
            italic: false,
            monospace: false,
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_monospace(mut self, monospace: bool) -> Self {
        self.monospace = monospace;
        self
    }

    /// CSS `font` shorthand, e.g. `italic bold 30px Vazirmatn`.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.italic {
            out.push_str("italic ");
        }
        if self.bold {
            out.push_str("bold ");
        }
        let family = if self.monospace {
            "monospace"
        } else {
            self.family.as_str()
        };
        out.push_str(&format!("{}px {}", self.size_px, family));
        out
    }
}

/// Measures rendered text width for a font.
///
/// Implementations must be deterministic for a fixed font descriptor.
pub trait TextMeasurer {
    /// Width in pixels of `text` drawn with `font`.
    fn measure_text_px(&self, text: &str, font: &FontDescriptor) -> f32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &FontDescriptor) -> f32,
{
    fn measure_text_px(&self, text: &str, font: &FontDescriptor) -> f32 {
        self(text, font)
    }
}

/// Approximates width as `chars * size * advance`, with a wider advance for bold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceWidthMeasurer {
    /// Average advance per character, as a fraction of the font size.
    pub advance: f32,
    /// Extra advance applied to bold faces.
    pub bold_extra: f32,
}

impl Default for AdvanceWidthMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.5,
            bold_extra: 0.05,
        }
    }
}

impl AdvanceWidthMeasurer {
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            bold_extra: 0.0,
        }
    }
}

impl TextMeasurer for AdvanceWidthMeasurer {
    fn measure_text_px(&self, text: &str, font: &FontDescriptor) -> f32 {
        let advance = if font.bold {
            self.advance + self.bold_extra
        } else {
            self.advance
        };
        text.chars().count() as f32 * font.size_px * advance
    }
}
