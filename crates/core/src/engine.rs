//! Deck orchestration: validate, classify, paginate, render.

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::measure::TextMeasurer;
use crate::paginate::paginate;
use crate::render::{DrawCommand, SlideImages, SlideRenderer};
use crate::settings::Settings;
use crate::stats::{
    count_words, estimate_reading_time, extract_outline, DeckStats, WORDS_PER_MINUTE,
};
use crate::types::{ClassifiedLine, Deck, Page};

/// Builds decks from text with an injected text measurer.
///
/// The engine holds no per-deck state. Every call rebuilds its output from
/// scratch, so one engine can serve any number of decks.
#[derive(Default)]
pub struct SlideEngine {
    text_measurer: Option<Box<dyn TextMeasurer>>,
}

impl std::fmt::Debug for SlideEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideEngine")
            .field("has_text_measurer", &self.text_measurer.is_some())
            .finish()
    }
}

impl SlideEngine {
    /// Create an engine without a measurer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the text measurer used for wrapping and run placement.
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.text_measurer = Some(Box::new(measurer));
        self
    }

    fn measurer(&self) -> Result<&dyn TextMeasurer> {
        self.text_measurer
            .as_deref()
            .ok_or(Error::MeasurementUnavailable)
    }

    /// Split raw text into classified, wrapped lines.
    pub fn classify(&self, text: &str, settings: &Settings) -> Result<Vec<ClassifiedLine>> {
        Ok(classify(text, settings, self.measurer()?))
    }

    /// Build the full deck: optional title page followed by content pages.
    ///
    /// Fails with [`Error::InvalidInput`] when there is neither text nor a title.
    pub fn build_deck(&self, text: &str, settings: &Settings) -> Result<Deck> {
        if text.trim().is_empty() && !settings.has_title() {
            return Err(Error::InvalidInput);
        }
        settings.validate()?;

        let lines = self.classify(text, settings)?;
        let mut pages = Vec::with_capacity(1);
        if settings.has_title() {
            pages.push(Page::Title);
        }
        pages.extend(paginate(&lines, settings));

        log::debug!(
            "built deck of {} slides (title page: {})",
            pages.len(),
            settings.has_title()
        );
        Ok(Deck::new(pages))
    }

    /// Draw commands for one slide of `deck`.
    pub fn render_page(
        &self,
        deck: &Deck,
        index: usize,
        settings: &Settings,
        images: SlideImages<'_>,
    ) -> Result<Vec<DrawCommand>> {
        let page = deck.pages.get(index).ok_or(Error::PageOutOfRange {
            index,
            len: deck.len(),
        })?;
        SlideRenderer::new(settings, self.measurer()?)
            .with_images(images)
            .render(page, index, deck.len())
    }

    /// Draw commands for every slide, in deck order.
    pub fn render_deck(
        &self,
        deck: &Deck,
        settings: &Settings,
        images: SlideImages<'_>,
    ) -> Result<Vec<Vec<DrawCommand>>> {
        let renderer = SlideRenderer::new(settings, self.measurer()?).with_images(images);
        deck.iter()
            .enumerate()
            .map(|(index, page)| renderer.render(page, index, deck.len()))
            .collect()
    }
}

/// Statistics for the source text and the deck built from it.
pub fn deck_stats(
    text: &str,
    deck: &Deck,
    settings: &Settings,
    images: SlideImages<'_>,
) -> DeckStats {
    DeckStats {
        word_count: count_words(text),
        reading_time_minutes: estimate_reading_time(text, WORDS_PER_MINUTE),
        slide_count: deck.len(),
        has_title: settings.has_title(),
        has_images: images.has_any(),
        outline: extract_outline(text),
    }
}
