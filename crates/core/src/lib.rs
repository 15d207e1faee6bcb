//! Core layout engine for turning markdown-like text into fixed-size slides.
//!
//! Text flows one way: classification and wrapping, then pagination, then
//! per-slide draw commands. Everything here is pure and synchronous; text
//! measurement and image metadata are injected by the caller.

pub mod classify;
pub mod engine;
pub mod error;
pub mod image;
pub mod inline;
pub mod measure;
pub mod paginate;
pub mod render;
pub mod settings;
pub mod stats;
pub mod types;
pub mod wrap;

pub use classify::classify;
pub use engine::{deck_stats, SlideEngine};
pub use error::{Error, Result};
pub use image::{BlitParams, ImageRole, ImageSize, ImageSource, LoadedImage, Rect};
pub use inline::parse_inline;
pub use measure::{AdvanceWidthMeasurer, FontDescriptor, TextMeasurer};
pub use paginate::{line_height, paginate};
pub use render::{DrawCommand, SlideImages, SlideRenderer};
pub use settings::{
    BackgroundFit, Color, NumeralSystem, Palette, Settings, SlideFormat, TextDirection,
};
pub use stats::{DeckStats, OutlineEntry, OutlineKind};
pub use types::{ClassifiedLine, Deck, HeadingLevel, InlineStyle, Page, StyledRun};
pub use wrap::wrap_text;
