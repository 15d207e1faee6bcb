//! Error types for slide deck generation.

use crate::image::ImageRole;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Neither body text nor a title was supplied, so there is nothing to lay out.
    #[error("Invalid input: enter a title or some text before generating slides")]
    InvalidInput,

    /// An image is attached but its pixel dimensions are not known yet.
    #[error("The {0} image is still loading")]
    ImageNotReady(ImageRole),

    /// No text measurer was configured, so text cannot be wrapped or positioned.
    #[error("Text measurement is unavailable")]
    MeasurementUnavailable,

    /// The settings snapshot failed validation.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// A slide index past the end of the deck was requested.
    #[error("Slide {index} is out of range for a deck of {len} slides")]
    PageOutOfRange { index: usize, len: usize },

    /// A color value could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The settings document is not valid JSON for the settings schema.
    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
