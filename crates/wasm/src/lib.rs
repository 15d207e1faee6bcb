//! WASM bindings for the slide layout engine.
//!
//! Text is measured through a JavaScript callback, typically wrapping
//! `CanvasRenderingContext2D.measureText`, so wrapping matches what the
//! browser will actually draw. Image metadata is passed as plain objects.

use serde::{Deserialize, Serialize};
use slidegen_core::{
    deck_stats, AdvanceWidthMeasurer, Deck, DeckStats, DrawCommand, FontDescriptor, ImageSource,
    LoadedImage, Settings, SlideEngine, SlideImages, StyledRun, TextMeasurer,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

const FALLBACK_WARNING: &str =
    "Text measurement callback failed; widths were estimated and wrapping may differ";

/// Source of measured widths for a CSS font string.
trait MeasureCallback {
    /// Width in pixels, or `None` when the callback failed.
    fn measure(&self, text: &str, css_font: &str) -> Option<f64>;
}

/// JS function `(text, cssFont) => widthPx`.
impl MeasureCallback for js_sys::Function {
    fn measure(&self, text: &str, css_font: &str) -> Option<f64> {
        self.call2(
            &JsValue::NULL,
            &JsValue::from_str(text),
            &JsValue::from_str(css_font),
        )
        .ok()
        .and_then(|v| v.as_f64())
    }
}

/// Measurer that defers to a callback and estimates widths when it fails.
///
/// The first failure is logged and recorded in a flag shared with the
/// caller, so it can be reported once per call instead of once per string.
struct CallbackMeasurer<C> {
    callback: C,
    estimate: AdvanceWidthMeasurer,
    fell_back: Rc<Cell<bool>>,
}

impl<C: MeasureCallback> CallbackMeasurer<C> {
    fn new(callback: C) -> Self {
        Self {
            callback,
            estimate: AdvanceWidthMeasurer::default(),
            fell_back: Rc::new(Cell::new(false)),
        }
    }

    fn fallback_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.fell_back)
    }
}

impl<C: MeasureCallback> TextMeasurer for CallbackMeasurer<C> {
    fn measure_text_px(&self, text: &str, font: &FontDescriptor) -> f32 {
        match self.callback.measure(text, &font.css()) {
            Some(width) if width.is_finite() && width >= 0.0 => width as f32,
            _ => {
                if !self.fell_back.replace(true) {
                    log::warn!("measure callback failed for {:?}, estimating widths", text);
                }
                self.estimate.measure_text_px(text, font)
            }
        }
    }
}

fn fallback_warning(flag: &Cell<bool>) -> Option<String> {
    flag.get().then(|| FALLBACK_WARNING.to_string())
}

/// Image metadata supplied by the page.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckImages {
    pub background: Option<LoadedImage>,
    pub author: Option<LoadedImage>,
}

impl DeckImages {
    fn as_slide_images(&self) -> SlideImages<'_> {
        SlideImages {
            background: self.background.as_ref().map(|i| i as &dyn ImageSource),
            author: self.author.as_ref().map(|i| i as &dyn ImageSource),
        }
    }
}

/// Result of building a deck.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckResult {
    /// Number of slides, title page included.
    pub slide_count: usize,
    /// The paginated deck.
    pub deck: Deck,
    /// Set when text widths had to be estimated.
    pub warning: Option<String>,
}

/// Result of rendering a deck.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResult {
    pub width: f32,
    pub height: f32,
    /// Draw commands per slide, in deck order.
    pub slides: Vec<Vec<DrawCommand>>,
    /// Set when text widths had to be estimated.
    pub warning: Option<String>,
}

fn parse_settings(settings: JsValue) -> Result<Settings, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(Settings::default());
    }
    serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))
}

fn parse_images(images: JsValue) -> Result<DeckImages, JsValue> {
    if images.is_undefined() || images.is_null() {
        return Ok(DeckImages::default());
    }
    serde_wasm_bindgen::from_value(images)
        .map_err(|e| JsValue::from_str(&format!("Invalid image metadata: {}", e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Classify and paginate `text` into a deck.
///
/// # Arguments
/// * `text` - Raw markdown-like source text
/// * `settings` - Settings object; missing fields use defaults
/// * `measure` - `(text, cssFont) => widthPx`
#[wasm_bindgen]
pub fn build_deck(
    text: &str,
    settings: JsValue,
    measure: js_sys::Function,
) -> Result<JsValue, JsValue> {
    let settings = parse_settings(settings)?;
    let result = build_deck_impl(text, &settings, measure)
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&result)
}

fn build_deck_impl(
    text: &str,
    settings: &Settings,
    callback: impl MeasureCallback + 'static,
) -> Result<DeckResult, String> {
    let measurer = CallbackMeasurer::new(callback);
    let fell_back = measurer.fallback_flag();
    let engine = SlideEngine::new().with_measurer(measurer);
    let deck = engine.build_deck(text, settings).map_err(|e| e.to_string())?;
    Ok(DeckResult {
        slide_count: deck.len(),
        deck,
        warning: fallback_warning(&fell_back),
    })
}

/// Build a deck and produce draw commands for every slide.
///
/// # Arguments
/// * `text` - Raw markdown-like source text
/// * `settings` - Settings object; missing fields use defaults
/// * `measure` - `(text, cssFont) => widthPx`
/// * `images` - `{ background?, author? }`, each `{ width, height, ready }`
///
/// # Returns
/// A JavaScript object with the slide size and per-slide commands, or throws
/// when an attached image is still loading.
#[wasm_bindgen]
pub fn render_deck(
    text: &str,
    settings: JsValue,
    measure: js_sys::Function,
    images: JsValue,
) -> Result<JsValue, JsValue> {
    let settings = parse_settings(settings)?;
    let images = parse_images(images)?;
    let result = render_deck_impl(text, &settings, measure, &images)
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&result)
}

fn render_deck_impl(
    text: &str,
    settings: &Settings,
    callback: impl MeasureCallback + 'static,
    images: &DeckImages,
) -> Result<RenderResult, String> {
    let measurer = CallbackMeasurer::new(callback);
    let fell_back = measurer.fallback_flag();
    let engine = SlideEngine::new().with_measurer(measurer);
    let deck = engine.build_deck(text, settings).map_err(|e| e.to_string())?;
    let slides = engine
        .render_deck(&deck, settings, images.as_slide_images())
        .map_err(|e| e.to_string())?;
    let (width, height) = settings.slide_size();
    Ok(RenderResult {
        width,
        height,
        slides,
        warning: fallback_warning(&fell_back),
    })
}

/// Word count, reading time and outline for `text`.
#[wasm_bindgen]
pub fn text_stats(
    text: &str,
    settings: JsValue,
    measure: js_sys::Function,
    images: JsValue,
) -> Result<JsValue, JsValue> {
    let settings = parse_settings(settings)?;
    let images = parse_images(images)?;
    let result = text_stats_impl(text, &settings, measure, &images)
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&result)
}

fn text_stats_impl(
    text: &str,
    settings: &Settings,
    callback: impl MeasureCallback + 'static,
    images: &DeckImages,
) -> Result<DeckStats, String> {
    let deck = build_deck_impl(text, settings, callback)?.deck;
    Ok(deck_stats(text, &deck, settings, images.as_slide_images()))
}

/// Split one line into styled runs.
#[wasm_bindgen]
pub fn parse_inline(text: &str) -> Result<JsValue, JsValue> {
    to_js(&parse_inline_impl(text))
}

fn parse_inline_impl(text: &str) -> Vec<StyledRun> {
    slidegen_core::parse_inline(text)
}
