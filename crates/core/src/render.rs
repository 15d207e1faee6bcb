//! Render instruction building: one page to an ordered list of draw commands.
//!
//! Output is backend-agnostic. A canvas, a rasteriser or a test can replay
//! the commands in order. Building is pure: the same page, settings, image
//! metadata and measurer always produce the same list.

use crate::error::Result;
use crate::image::{fit_image, ready_size, square_crop, ImageRole, ImageSource, Rect};
use crate::inline::parse_inline;
use crate::measure::{FontDescriptor, TextMeasurer};
use crate::paginate::line_height;
use crate::settings::{Color, Settings, TextDirection};
use crate::types::{ClassifiedLine, InlineStyle, Page, StyledRun};
use serde::{Deserialize, Serialize};

const AVATAR_SIZE: f32 = 300.0;
const HIGHLIGHT_COLOR: Color = Color::rgb(0xff, 0xff, 0x00);
const PROGRESS_TRACK_COLOR: Color = Color::rgb(0x88, 0x88, 0x88);
const PROGRESS_BAR_HEIGHT: f32 = 12.0;
const SEPARATOR_HALF_WIDTH: f32 = 100.0;

/// Fill style for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Color },
    /// Linear gradient from the top edge to the bottom edge of the rectangle.
    VerticalGradient { top: Color, bottom: Color },
}

/// Horizontal anchor of a text command's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text command's `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectCommand {
    pub rect: Rect,
    pub paint: Paint,
    pub alpha: f32,
}

/// Circular clip applied to an image blit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleClip {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

/// Blit a region of an attached image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageCommand {
    pub role: ImageRole,
    pub source: Rect,
    pub dest: Rect,
    pub alpha: f32,
    pub clip: Option<CircleClip>,
}

/// Draw one string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCommand {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: FontDescriptor,
    pub color: Color,
    pub alpha: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleCommand {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub thickness: f32,
    pub color: Color,
    pub alpha: f32,
}

/// Backend-agnostic draw primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect(RectCommand),
    Image(ImageCommand),
    Text(TextCommand),
    Rule(RuleCommand),
}

/// Images attached to the deck. Only the title page draws them.
#[derive(Clone, Copy, Default)]
pub struct SlideImages<'a> {
    pub background: Option<&'a dyn ImageSource>,
    pub author: Option<&'a dyn ImageSource>,
}

impl<'a> SlideImages<'a> {
    pub fn has_any(&self) -> bool {
        self.background.is_some() || self.author.is_some()
    }
}

/// A run placed on a line.
struct PlacedRun<'r> {
    run: &'r StyledRun,
    font: FontDescriptor,
    left: f32,
    width: f32,
}

/// Font for a run, derived from the line's base font.
fn run_font(base: &FontDescriptor, style: Option<InlineStyle>) -> FontDescriptor {
    match style {
        Some(InlineStyle::Bold) => base.clone().with_bold(true),
        Some(InlineStyle::Italic) => base.clone().with_italic(true),
        Some(InlineStyle::Code) => base.clone().with_monospace(true),
        _ => base.clone(),
    }
}

/// Builds draw commands for pages of one deck.
pub struct SlideRenderer<'a> {
    settings: &'a Settings,
    measurer: &'a dyn TextMeasurer,
    images: SlideImages<'a>,
}

impl<'a> SlideRenderer<'a> {
    pub fn new(settings: &'a Settings, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            settings,
            measurer,
            images: SlideImages::default(),
        }
    }

    pub fn with_images(mut self, images: SlideImages<'a>) -> Self {
        self.images = images;
        self
    }

    /// Draw commands for the page at `index` of a `total`-page deck.
    ///
    /// Fails with [`crate::Error::ImageNotReady`] when the title page needs an
    /// attached image whose size is not known yet.
    pub fn render(&self, page: &Page, index: usize, total: usize) -> Result<Vec<DrawCommand>> {
        let mut cmds = Vec::new();
        self.push_background(&mut cmds);

        match page {
            Page::Title => {
                if let Some(image) = self.images.background {
                    self.push_background_image(&mut cmds, image)?;
                }
                self.push_title(&mut cmds)?;
            }
            Page::Content(lines) => self.push_content(&mut cmds, lines),
        }

        self.push_footer(&mut cmds, index, total);
        log::debug!("slide {} of {}: {} draw commands", index + 1, total, cmds.len());
        Ok(cmds)
    }

    fn push_background(&self, cmds: &mut Vec<DrawCommand>) {
        let (width, height) = self.settings.slide_size();
        let palette = &self.settings.palette;
        let paint = if palette.background_top != palette.background_bottom {
            Paint::VerticalGradient {
                top: palette.background_top,
                bottom: palette.background_bottom,
            }
        } else {
            Paint::Solid {
                color: palette.background_top,
            }
        };
        cmds.push(DrawCommand::Rect(RectCommand {
            rect: Rect::new(0.0, 0.0, width, height),
            paint,
            alpha: 1.0,
        }));
    }

    fn push_background_image(
        &self,
        cmds: &mut Vec<DrawCommand>,
        image: &dyn ImageSource,
    ) -> Result<()> {
        let size = ready_size(image, ImageRole::Background)?;
        let (width, height) = self.settings.slide_size();
        let params = fit_image(size, width, height, self.settings.background_fit);
        cmds.push(DrawCommand::Image(ImageCommand {
            role: ImageRole::Background,
            source: params.source,
            dest: params.dest,
            alpha: self.settings.background_opacity,
            clip: None,
        }));
        Ok(())
    }

    fn push_title(&self, cmds: &mut Vec<DrawCommand>) -> Result<()> {
        let settings = self.settings;
        let (width, height) = settings.slide_size();
        let safe = settings.safe_zone();
        let center_x = width / 2.0;
        let has_subtitle = !settings.subtitle_text.is_empty();

        let mut y = safe.top + (height - safe.top - safe.bottom) / 2.0;
        if has_subtitle {
            y -= 50.0;
        }

        if let Some(author) = self.images.author {
            let size = ready_size(author, ImageRole::Author)?;
            let top = y - AVATAR_SIZE - 10.0;
            let radius = AVATAR_SIZE / 2.0;
            cmds.push(DrawCommand::Image(ImageCommand {
                role: ImageRole::Author,
                source: square_crop(size),
                dest: Rect::new(center_x - radius, top, AVATAR_SIZE, AVATAR_SIZE),
                alpha: 1.0,
                clip: Some(CircleClip {
                    center_x,
                    center_y: top + radius,
                    radius,
                }),
            }));
            y += radius + 15.0;
        }

        let title_runs = parse_inline(&settings.title_text);
        self.push_runs(
            cmds,
            &title_runs,
            &settings.scaled_font(1.5),
            center_x,
            y,
            TextAlign::Center,
            TextBaseline::Middle,
            settings.palette.text,
        );

        if has_subtitle {
            cmds.push(DrawCommand::Rule(RuleCommand {
                x1: center_x - SEPARATOR_HALF_WIDTH,
                y1: y + 35.0,
                x2: center_x + SEPARATOR_HALF_WIDTH,
                y2: y + 35.0,
                thickness: 2.0,
                color: settings.palette.text,
                alpha: 0.5,
            }));

            let subtitle_runs = parse_inline(&settings.subtitle_text);
            self.push_runs(
                cmds,
                &subtitle_runs,
                &settings.scaled_font(0.8),
                center_x,
                y + 70.0,
                TextAlign::Center,
                TextBaseline::Middle,
                settings.palette.text,
            );
        }

        Ok(())
    }

    fn push_content(&self, cmds: &mut Vec<DrawCommand>, lines: &[ClassifiedLine]) {
        let settings = self.settings;
        let (width, _) = settings.slide_size();
        let margin = settings.side_margin();
        let (anchor, align) = match settings.direction {
            TextDirection::Rtl => (width - margin, TextAlign::Right),
            TextDirection::Ltr => (margin, TextAlign::Left),
        };

        let mut y = settings.padding + settings.safe_zone().top;

        for line in lines {
            match line {
                ClassifiedLine::Heading { text, level } => {
                    let font = settings.scaled_font(level.scale()).with_bold(true);
                    let runs = parse_inline(text);
                    self.push_runs(
                        cmds,
                        &runs,
                        &font,
                        anchor,
                        y,
                        align,
                        TextBaseline::Top,
                        settings.palette.text,
                    );
                }
                ClassifiedLine::Body { text, .. } | ClassifiedLine::ListItem { text, .. } => {
                    let mut runs = Vec::new();
                    if line.shows_bullet() {
                        runs.push(StyledRun::plain(format!("{} ", settings.bullet_char)));
                    }
                    runs.extend(parse_inline(text));
                    self.push_runs(
                        cmds,
                        &runs,
                        &settings.body_font(),
                        anchor,
                        y,
                        align,
                        TextBaseline::Top,
                        settings.palette.text,
                    );
                }
                ClassifiedLine::Quote { text } => {
                    let mut runs = vec![StyledRun::plain("\"")];
                    runs.extend(parse_inline(text));
                    runs.push(StyledRun::plain("\""));
                    let font = settings.body_font().with_italic(true);
                    self.push_runs(
                        cmds,
                        &runs,
                        &font,
                        anchor,
                        y,
                        align,
                        TextBaseline::Top,
                        settings.palette.accent,
                    );
                }
                ClassifiedLine::Spacer => {}
            }
            y += line_height(line, settings);
        }
    }

    fn push_footer(&self, cmds: &mut Vec<DrawCommand>, index: usize, total: usize) {
        let settings = self.settings;
        let (width, height) = settings.slide_size();
        let safe = settings.safe_zone();
        let center_x = width / 2.0;

        if !settings.footer_text.is_empty() {
            cmds.push(DrawCommand::Text(TextCommand {
                x: center_x,
                y: height - settings.padding / 2.0 - safe.bottom,
                text: settings.footer_text.clone(),
                font: settings.scaled_font(0.7),
                color: settings.palette.text,
                alpha: 1.0,
                align: TextAlign::Center,
                baseline: TextBaseline::Bottom,
            }));
        }

        let total = total.max(1);
        cmds.push(DrawCommand::Text(TextCommand {
            x: center_x,
            y: height - 20.0 - safe.bottom,
            text: format!(
                "{} / {}",
                settings.numerals.format(index + 1),
                settings.numerals.format(total)
            ),
            font: settings.scaled_font(0.6),
            color: settings.palette.text,
            alpha: 0.7,
            align: TextAlign::Center,
            baseline: TextBaseline::Bottom,
        }));

        let bar_x = settings.side_margin();
        let bar_width = width - 2.0 * bar_x;
        let bar_y = height - PROGRESS_BAR_HEIGHT - safe.bottom;
        cmds.push(DrawCommand::Rect(RectCommand {
            rect: Rect::new(bar_x, bar_y, bar_width, PROGRESS_BAR_HEIGHT),
            paint: Paint::Solid {
                color: PROGRESS_TRACK_COLOR,
            },
            alpha: 0.18,
        }));

        let progress = ((index + 1) as f32 / total as f32).min(1.0);
        let fill_width = bar_width * progress;
        // fill grows from the edge where reading starts
        let fill_x = match settings.direction {
            TextDirection::Rtl => bar_x + bar_width - fill_width,
            TextDirection::Ltr => bar_x,
        };
        cmds.push(DrawCommand::Rect(RectCommand {
            rect: Rect::new(fill_x, bar_y, fill_width, PROGRESS_BAR_HEIGHT),
            paint: Paint::Solid {
                color: settings.palette.primary,
            },
            alpha: 0.7,
        }));
    }

    /// Measure and place runs so that the whole line is anchored at `anchor_x`.
    ///
    /// Runs are laid out in reading order: right to left for RTL text.
    fn place_runs<'r>(
        &self,
        runs: &'r [StyledRun],
        base: &FontDescriptor,
        anchor_x: f32,
        align: TextAlign,
    ) -> Vec<PlacedRun<'r>> {
        let mut placed: Vec<PlacedRun<'r>> = runs
            .iter()
            .map(|run| {
                let font = run_font(base, run.style);
                let width = self.measurer.measure_text_px(&run.text, &font);
                PlacedRun {
                    run,
                    font,
                    left: 0.0,
                    width,
                }
            })
            .collect();

        let total: f32 = placed.iter().map(|p| p.width).sum();
        let line_left = match align {
            TextAlign::Left => anchor_x,
            TextAlign::Center => anchor_x - total / 2.0,
            TextAlign::Right => anchor_x - total,
        };

        match self.settings.direction {
            TextDirection::Ltr => {
                let mut x = line_left;
                for p in &mut placed {
                    p.left = x;
                    x += p.width;
                }
            }
            TextDirection::Rtl => {
                let mut x = line_left + total;
                for p in &mut placed {
                    x -= p.width;
                    p.left = x;
                }
            }
        }

        placed
    }

    #[allow(clippy::too_many_arguments)]
    fn push_runs(
        &self,
        cmds: &mut Vec<DrawCommand>,
        runs: &[StyledRun],
        base: &FontDescriptor,
        anchor_x: f32,
        y: f32,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    ) {
        let size = base.size_px;
        let line_top = match baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - size / 2.0,
            TextBaseline::Bottom => y - size,
        };

        for placed in self.place_runs(runs, base, anchor_x, align) {
            let style = placed.run.style;

            if style == Some(InlineStyle::Highlight) {
                cmds.push(DrawCommand::Rect(RectCommand {
                    rect: Rect::new(placed.left, line_top - 2.0, placed.width, size + 4.0),
                    paint: Paint::Solid {
                        color: HIGHLIGHT_COLOR,
                    },
                    alpha: 1.0,
                }));
            }

            cmds.push(DrawCommand::Text(TextCommand {
                x: placed.left,
                y,
                text: placed.run.text.clone(),
                font: placed.font,
                color,
                alpha: 1.0,
                align: TextAlign::Left,
                baseline,
            }));

            let rule_y = match style {
                Some(InlineStyle::Underline) => Some(line_top + size),
                Some(InlineStyle::Strikethrough) => Some(line_top + size / 2.0),
                _ => None,
            };
            if let Some(rule_y) = rule_y {
                cmds.push(DrawCommand::Rule(RuleCommand {
                    x1: placed.left,
                    y1: rule_y,
                    x2: placed.left + placed.width,
                    y2: rule_y,
                    thickness: 1.0,
                    color,
                    alpha: 1.0,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::image::LoadedImage;
    use crate::measure::AdvanceWidthMeasurer;
    use crate::settings::SlideFormat;
    use crate::types::HeadingLevel;

    fn texts(cmds: &[DrawCommand]) -> Vec<&TextCommand> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn rects(cmds: &[DrawCommand]) -> Vec<&RectCommand> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Rect(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn body(text: &str, bullet: bool) -> ClassifiedLine {
        ClassifiedLine::Body {
            text: text.to_string(),
            is_first_of_paragraph: true,
            use_bullet: bullet,
        }
    }

    #[test]
    fn test_background_gradient_or_solid() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer.render(&Page::Content(vec![body("x", false)]), 0, 1).unwrap();
        assert!(matches!(
            cmds[0],
            DrawCommand::Rect(RectCommand {
                paint: Paint::VerticalGradient { .. },
                ..
            })
        ));

        let mut solid = Settings::default();
        solid.palette.background_bottom = solid.palette.background_top;
        let renderer = SlideRenderer::new(&solid, &measurer);
        let cmds = renderer.render(&Page::Content(vec![body("x", false)]), 0, 1).unwrap();
        assert!(matches!(
            cmds[0],
            DrawCommand::Rect(RectCommand {
                paint: Paint::Solid { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_body_right_aligned_for_rtl() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer.render(&Page::Content(vec![body("abcd", false)]), 0, 1).unwrap();

        let line = texts(&cmds)[0];
        assert_eq!(line.text, "abcd");
        // right edge at 1080 - 90, 4 chars * 15px wide
        assert_eq!(line.x, 990.0 - 60.0);
        assert_eq!(line.y, 90.0);
        assert_eq!(line.align, TextAlign::Left);
        assert_eq!(line.baseline, TextBaseline::Top);
    }

    #[test]
    fn test_rtl_runs_flow_right_to_left() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer
            .render(&Page::Content(vec![body("ab ==cd==", false)]), 0, 1)
            .unwrap();

        let t = texts(&cmds);
        assert_eq!(t[0].text, "ab ");
        assert_eq!(t[1].text, "cd");
        assert!(t[0].x > t[1].x);
        // highlight box drawn behind the highlighted run
        assert!(rects(&cmds)
            .iter()
            .any(|r| r.paint == Paint::Solid { color: HIGHLIGHT_COLOR } && r.rect.x == t[1].x));
    }

    #[test]
    fn test_ltr_body_left_aligned() {
        let settings = Settings {
            direction: TextDirection::Ltr,
            ..Settings::default()
        };
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer
            .render(&Page::Content(vec![body("ab **cd**", false)]), 0, 1)
            .unwrap();
        let t = texts(&cmds);
        assert_eq!(t[0].x, 90.0);
        assert_eq!(t[1].x, 90.0 + 45.0);
        assert!(t[1].font.bold);
    }

    #[test]
    fn test_bullet_prefixed_once() {
        let settings = Settings {
            use_bullets: true,
            bullet_char: "✅".to_string(),
            ..Settings::default()
        };
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let page = Page::Content(vec![
            body("first", true),
            ClassifiedLine::Body {
                text: "continued".to_string(),
                is_first_of_paragraph: false,
                use_bullet: false,
            },
        ]);
        let cmds = renderer.render(&page, 0, 1).unwrap();
        let bullets = texts(&cmds).iter().filter(|t| t.text == "✅ ").count();
        assert_eq!(bullets, 1);
    }

    #[test]
    fn test_heading_and_quote_styles() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let page = Page::Content(vec![
            ClassifiedLine::Heading {
                text: "Head".to_string(),
                level: HeadingLevel::H2,
            },
            ClassifiedLine::Quote {
                text: "wise".to_string(),
            },
        ]);
        let cmds = renderer.render(&page, 0, 1).unwrap();
        let t = texts(&cmds);

        assert_eq!(t[0].text, "Head");
        assert!(t[0].font.bold);
        assert_eq!(t[0].font.size_px, 30.0 * 1.3);

        let quoted: Vec<_> = t[1..4].iter().map(|c| c.text.as_str()).collect();
        assert_eq!(quoted, vec!["\"", "wise", "\""]);
        assert!(t[1..4].iter().all(|c| c.font.italic && c.color == settings.palette.accent));
        // the quote sits one heading height below the top
        assert_eq!(t[1].y, 90.0 + 78.0);
    }

    #[test]
    fn test_progress_bar_anchored_to_trailing_edge() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer.render(&Page::Content(vec![body("x", false)]), 0, 4).unwrap();

        let bars = rects(&cmds);
        let track = bars[bars.len() - 2];
        let fill = bars[bars.len() - 1];
        assert_eq!(track.rect, Rect::new(90.0, 1068.0, 900.0, 12.0));
        assert_eq!(fill.rect.width, 225.0);
        assert_eq!(fill.rect.x, 90.0 + 900.0 - 225.0);
        assert_eq!(fill.alpha, 0.7);
    }

    #[test]
    fn test_slide_indicator_uses_numeral_system() {
        let settings = Settings::default();
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer.render(&Page::Content(vec![body("x", false)]), 1, 3).unwrap();
        assert!(texts(&cmds).iter().any(|t| t.text == "۲ / ۳"));
    }

    #[test]
    fn test_footer_text_drawn_when_set() {
        let settings = Settings {
            footer_text: "@channel".to_string(),
            ..Settings::default()
        };
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer.render(&Page::Content(vec![body("x", false)]), 0, 1).unwrap();
        let footer = texts(&cmds).into_iter().find(|t| t.text == "@channel").unwrap();
        assert_eq!(footer.y, 1080.0 - 45.0);
        assert_eq!(footer.align, TextAlign::Center);
    }

    #[test]
    fn test_title_page_centered_with_subtitle() {
        let settings = Settings {
            title_text: "Title".to_string(),
            subtitle_text: "Sub".to_string(),
            ..Settings::default()
        };
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let renderer = SlideRenderer::new(&settings, &measurer);
        let cmds = renderer.render(&Page::Title, 0, 2).unwrap();

        let t = texts(&cmds);
        let title = t[0];
        // 5 chars at 45px font, 22.5px each
        assert_eq!(title.x, 540.0 - 112.5 / 2.0);
        assert_eq!(title.y, 540.0 - 50.0);
        assert_eq!(t[1].text, "Sub");
        assert_eq!(t[1].y, 490.0 + 70.0);
        assert!(cmds.iter().any(|c| matches!(c, DrawCommand::Rule(r) if r.y1 == 525.0)));
    }

    #[test]
    fn test_title_images_require_ready_metadata() {
        let settings = Settings::default().with_title("T");
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let pending = LoadedImage::pending();

        let renderer = SlideRenderer::new(&settings, &measurer).with_images(SlideImages {
            background: Some(&pending),
            author: None,
        });
        assert!(matches!(
            renderer.render(&Page::Title, 0, 1),
            Err(Error::ImageNotReady(ImageRole::Background))
        ));

        // content pages never draw images
        assert!(renderer.render(&Page::Content(vec![body("x", false)]), 0, 1).is_ok());
    }

    #[test]
    fn test_title_images_drawn_when_ready() {
        let settings = Settings::default().with_title("T").with_format(SlideFormat::Story);
        let measurer = AdvanceWidthMeasurer::new(0.5);
        let background = LoadedImage::ready(1080, 1920);
        let author = LoadedImage::ready(600, 400);

        let renderer = SlideRenderer::new(&settings, &measurer).with_images(SlideImages {
            background: Some(&background),
            author: Some(&author),
        });
        let cmds = renderer.render(&Page::Title, 0, 1).unwrap();

        let images: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image(i) => Some(i),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].role, ImageRole::Background);
        assert_eq!(images[0].alpha, 0.3);
        assert_eq!(images[1].role, ImageRole::Author);
        assert_eq!(images[1].source, Rect::new(100.0, 0.0, 400.0, 400.0));
        let clip = images[1].clip.unwrap();
        assert_eq!(clip.radius, 150.0);

        // safe-area centre is 960, the title drops below the avatar
        let title = texts(&cmds)[0];
        assert_eq!(title.y, 960.0 + 165.0);
    }
}
