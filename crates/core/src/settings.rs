//! Settings snapshot consumed by every stage of deck generation.
//!
//! The core never mutates settings; the calling shell owns loading, saving
//! and any cross-call memory. Every field has a default so partial JSON
//! documents are accepted.

use crate::error::{Error, Result};
use crate::measure::{FontDescriptor, DEFAULT_FONT_FAMILY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vertical space kept free at the bottom of every slide for the footer.
pub const DEFAULT_FOOTER_RESERVE_PX: f32 = 80.0;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `#rgb` or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        if !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }

        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };

        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colors used when drawing a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Top stop of the background gradient.
    pub background_top: Color,
    /// Bottom stop. Equal to `background_top` for a solid fill.
    pub background_bottom: Color,
    pub text: Color,
    /// Progress bar fill.
    pub primary: Color,
    /// Quote text.
    pub accent: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_top: Color::rgb(0xf5, 0xf5, 0xf5),
            background_bottom: Color::rgb(0xe0, 0xe0, 0xe0),
            text: Color::rgb(0x21, 0x21, 0x21),
            primary: Color::rgb(0x00, 0x7b, 0xff),
            accent: Color::rgb(0x28, 0xa7, 0x45),
        }
    }
}

/// Insets that overlays of the target platform may cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    pub top: f32,
    pub bottom: f32,
    pub side: f32,
}

/// Output slide format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideFormat {
    /// Square 1080×1080 feed post.
    #[default]
    Post,
    /// Vertical 1080×1920 story.
    Story,
}

impl SlideFormat {
    /// Slide size in pixels as `(width, height)`.
    pub fn size(self) -> (f32, f32) {
        match self {
            Self::Post => (1080.0, 1080.0),
            Self::Story => (1080.0, 1920.0),
        }
    }

    pub fn safe_zone(self) -> SafeZone {
        match self {
            Self::Post => SafeZone::default(),
            Self::Story => SafeZone {
                top: 250.0,
                bottom: 250.0,
                side: 60.0,
            },
        }
    }
}

/// How the background image is fitted to the slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundFit {
    /// Fill and crop, keeping the top edge.
    CoverTop,
    /// Fill and crop around the centre.
    #[default]
    CoverCenter,
    /// Fill and crop, keeping the bottom edge.
    CoverBottom,
    /// Fit inside the slide, letterboxing the rest.
    Contain,
    /// Map the whole image onto the whole slide.
    Stretch,
}

/// Reading direction of slide text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Rtl,
    Ltr,
}

/// Digits used for the slide indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralSystem {
    Latin,
    #[default]
    Persian,
}

impl NumeralSystem {
    /// Format a number with this system's digits.
    pub fn format(self, n: usize) -> String {
        let latin = n.to_string();
        match self {
            Self::Latin => latin,
            Self::Persian => latin
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => char::from_u32(0x06F0 + d).unwrap_or(c),
                    None => c,
                })
                .collect(),
        }
    }
}

/// Immutable configuration snapshot for one deck build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base font size in pixels.
    pub font_size: f32,
    /// Outer padding in pixels.
    pub padding: f32,
    /// Line height as a multiple of the font size.
    pub line_height_multiplier: f32,
    pub bullet_char: String,
    pub use_bullets: bool,
    pub font_family: String,
    pub format: SlideFormat,
    pub direction: TextDirection,
    pub numerals: NumeralSystem,
    pub palette: Palette,
    pub title_text: String,
    pub subtitle_text: String,
    pub footer_text: String,
    /// Alpha of the title-page background image (0..=1).
    pub background_opacity: f32,
    pub background_fit: BackgroundFit,
    /// Space reserved above the bottom edge for the footer.
    pub footer_reserve: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 30.0,
            padding: 90.0,
            line_height_multiplier: 2.0,
            bullet_char: "•".to_string(),
            use_bullets: false,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            format: SlideFormat::default(),
            direction: TextDirection::default(),
            numerals: NumeralSystem::default(),
            palette: Palette::default(),
            title_text: String::new(),
            subtitle_text: String::new(),
            footer_text: String::new(),
            background_opacity: 0.3,
            background_fit: BackgroundFit::default(),
            footer_reserve: DEFAULT_FOOTER_RESERVE_PX,
        }
    }
}

impl Settings {
    /// Parse a JSON settings document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_format(mut self, format: SlideFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_text = title.into();
        self
    }

    /// Check that the snapshot describes a drawable layout.
    pub fn validate(&self) -> Result<()> {
        if self.font_size.is_nan() || self.font_size <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.padding.is_nan() || self.padding < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }
        if self.line_height_multiplier.is_nan() || self.line_height_multiplier < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "line_height_multiplier must not be negative, got {}",
                self.line_height_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.background_opacity) {
            return Err(Error::InvalidSettings(format!(
                "background_opacity must be within 0..=1, got {}",
                self.background_opacity
            )));
        }
        if self.footer_reserve.is_nan() || self.footer_reserve < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "footer_reserve must not be negative, got {}",
                self.footer_reserve
            )));
        }
        if self.content_width().is_nan() || self.content_width() <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "padding {} leaves no room for content",
                self.padding
            )));
        }
        Ok(())
    }

    /// Whether a title page is generated.
    pub fn has_title(&self) -> bool {
        !self.title_text.is_empty()
    }

    /// Slide size in pixels as `(width, height)`.
    pub fn slide_size(&self) -> (f32, f32) {
        self.format.size()
    }

    pub fn safe_zone(&self) -> SafeZone {
        self.format.safe_zone()
    }

    /// Horizontal room for text: width minus padding and side insets on both sides.
    pub fn content_width(&self) -> f32 {
        let (width, _) = self.slide_size();
        width - 2.0 * (self.padding + self.safe_zone().side)
    }

    /// Distance from the slide edge to the text edge.
    pub fn side_margin(&self) -> f32 {
        self.padding + self.safe_zone().side
    }

    /// Vertical budget the paginator packs lines into.
    ///
    /// Measured from the top of the safe area, so the top and bottom insets
    /// are both taken out.
    pub fn max_content_height(&self) -> f32 {
        let (_, height) = self.slide_size();
        let safe = self.safe_zone();
        height - safe.top - safe.bottom - self.padding - self.footer_reserve
    }

    /// Base body font.
    pub fn body_font(&self) -> FontDescriptor {
        FontDescriptor::regular(&self.font_family, self.font_size)
    }

    /// Body font scaled by `scale`.
    pub fn scaled_font(&self, scale: f32) -> FontDescriptor {
        FontDescriptor::regular(&self.font_family, self.font_size * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("#888".parse::<Color>().unwrap(), Color::rgb(0x88, 0x88, 0x88));
        assert_eq!(Color::rgb(0x0f, 0x20, 0x27).to_string(), "#0f2027");
        assert!("ff8000".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_defaults_geometry() {
        let settings = Settings::default();
        assert_eq!(settings.content_width(), 900.0);
        assert_eq!(settings.max_content_height(), 910.0);
        assert!(settings.validate().is_ok());
        assert!(!settings.has_title());
    }

    #[test]
    fn test_story_format_uses_safe_zone() {
        let settings = Settings::default().with_format(SlideFormat::Story);
        assert_eq!(settings.slide_size(), (1080.0, 1920.0));
        assert_eq!(settings.content_width(), 1080.0 - 2.0 * (90.0 + 60.0));
        assert_eq!(settings.side_margin(), 150.0);
        assert_eq!(settings.max_content_height(), 1920.0 - 500.0 - 90.0 - 80.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(
            r##"{"font_size": 24, "format": "story", "palette": {"text": "#ffffff"}, "background_fit": "cover-top"}"##,
        )
        .unwrap();
        assert_eq!(settings.font_size, 24.0);
        assert_eq!(settings.padding, 90.0);
        assert_eq!(settings.format, SlideFormat::Story);
        assert_eq!(settings.palette.text, Color::rgb(255, 255, 255));
        assert_eq!(settings.palette.primary, Palette::default().primary);
        assert_eq!(settings.background_fit, BackgroundFit::CoverTop);
    }

    #[test]
    fn test_invalid_json_and_values() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(Error::SettingsParse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"font_size": 0}"#),
            Err(Error::InvalidSettings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"padding": 600}"#),
            Err(Error::InvalidSettings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"footer_reserve": -2000}"#),
            Err(Error::InvalidSettings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"background_opacity": 1.5}"#),
            Err(Error::InvalidSettings(_))
        ));
        assert!(Settings::from_json(r#"{"palette": {"text": "red"}}"#).is_err());
    }

    #[test]
    fn test_persian_numerals() {
        assert_eq!(NumeralSystem::Persian.format(12), "۱۲");
        assert_eq!(NumeralSystem::Latin.format(12), "12");
    }
}
