//! Image metadata and blit geometry.
//!
//! Image decoding stays with the caller. The core only needs final pixel
//! dimensions, exposed through [`ImageSource`], to compute source and
//! destination rectangles.

use crate::error::{Error, Result};
use crate::settings::BackgroundFit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which attached image a draw instruction refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    /// Title-page background.
    Background,
    /// Circular author portrait on the title page.
    Author,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => write!(f, "background"),
            Self::Author => write!(f, "author"),
        }
    }
}

/// Natural pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Metadata of a caller-owned image handle.
pub trait ImageSource {
    /// Natural size once decoding has completed, `None` while still loading.
    fn natural_size(&self) -> Option<ImageSize>;
}

/// Plain metadata record for images loaded elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// Whether decoding finished.
    pub ready: bool,
}

impl LoadedImage {
    pub fn ready(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ready: true,
        }
    }

    pub fn pending() -> Self {
        Self {
            width: 0,
            height: 0,
            ready: false,
        }
    }
}

impl ImageSource for LoadedImage {
    fn natural_size(&self) -> Option<ImageSize> {
        self.ready.then_some(ImageSize {
            width: self.width,
            height: self.height,
        })
    }
}

/// Resolve a usable size, rejecting images still loading or without pixels.
pub fn ready_size(image: &dyn ImageSource, role: ImageRole) -> Result<ImageSize> {
    match image.natural_size() {
        Some(size) if size.width > 0 && size.height > 0 => Ok(size),
        _ => Err(Error::ImageNotReady(role)),
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Source crop and destination placement for one image blit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlitParams {
    pub source: Rect,
    pub dest: Rect,
}

/// Fit an image onto a `target_w` × `target_h` area.
///
/// Cover modes scale by `max(tw/sw, th/sh)` and crop the source; contain
/// scales by `min(...)` and letterboxes the destination; stretch maps the
/// whole source onto the whole target.
pub fn fit_image(size: ImageSize, target_w: f32, target_h: f32, fit: BackgroundFit) -> BlitParams {
    let (iw, ih) = (size.width as f32, size.height as f32);
    let full_source = Rect::new(0.0, 0.0, iw, ih);
    let full_dest = Rect::new(0.0, 0.0, target_w, target_h);

    let cover = |vertical: fn(f32, f32) -> f32| {
        let scale = (target_w / iw).max(target_h / ih);
        let sw = target_w / scale;
        let sh = target_h / scale;
        BlitParams {
            source: Rect::new((iw - sw) / 2.0, vertical(ih, sh), sw, sh),
            dest: full_dest,
        }
    };

    match fit {
        BackgroundFit::CoverTop => cover(|_, _| 0.0),
        BackgroundFit::CoverCenter => cover(|ih, sh| (ih - sh) / 2.0),
        BackgroundFit::CoverBottom => cover(|ih, sh| ih - sh),
        BackgroundFit::Contain => {
            let scale = (target_w / iw).min(target_h / ih);
            let dw = iw * scale;
            let dh = ih * scale;
            BlitParams {
                source: full_source,
                dest: Rect::new((target_w - dw) / 2.0, (target_h - dh) / 2.0, dw, dh),
            }
        }
        BackgroundFit::Stretch => BlitParams {
            source: full_source,
            dest: full_dest,
        },
    }
}

/// Largest centred square of the source image.
pub fn square_crop(size: ImageSize) -> Rect {
    let (iw, ih) = (size.width as f32, size.height as f32);
    if iw > ih {
        Rect::new((iw - ih) / 2.0, 0.0, ih, ih)
    } else {
        Rect::new(0.0, (ih - iw) / 2.0, iw, iw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: ImageSize = ImageSize {
        width: 2000,
        height: 1000,
    };

    fn assert_rect_near(actual: Rect, expected: Rect) {
        let close = |a: f32, b: f32| (a - b).abs() < 0.01;
        assert!(
            close(actual.x, expected.x)
                && close(actual.y, expected.y)
                && close(actual.width, expected.width)
                && close(actual.height, expected.height),
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_cover_center_crops_wide_image() {
        let params = fit_image(WIDE, 1080.0, 1080.0, BackgroundFit::CoverCenter);
        assert_rect_near(params.source, Rect::new(500.0, 0.0, 1000.0, 1000.0));
        assert_eq!(params.dest, Rect::new(0.0, 0.0, 1080.0, 1080.0));
    }

    #[test]
    fn test_cover_vertical_anchors() {
        let tall = ImageSize {
            width: 1000,
            height: 3000,
        };
        let top = fit_image(tall, 1080.0, 1080.0, BackgroundFit::CoverTop);
        let center = fit_image(tall, 1080.0, 1080.0, BackgroundFit::CoverCenter);
        let bottom = fit_image(tall, 1080.0, 1080.0, BackgroundFit::CoverBottom);
        assert_rect_near(top.source, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        assert_rect_near(center.source, Rect::new(0.0, 1000.0, 1000.0, 1000.0));
        assert_rect_near(bottom.source, Rect::new(0.0, 2000.0, 1000.0, 1000.0));
    }

    #[test]
    fn test_contain_letterboxes() {
        let params = fit_image(WIDE, 1080.0, 1080.0, BackgroundFit::Contain);
        assert_eq!(params.source, Rect::new(0.0, 0.0, 2000.0, 1000.0));
        assert_rect_near(params.dest, Rect::new(0.0, 270.0, 1080.0, 540.0));
    }

    #[test]
    fn test_stretch_maps_whole_image() {
        let params = fit_image(WIDE, 1080.0, 1920.0, BackgroundFit::Stretch);
        assert_eq!(params.source, Rect::new(0.0, 0.0, 2000.0, 1000.0));
        assert_eq!(params.dest, Rect::new(0.0, 0.0, 1080.0, 1920.0));
    }

    #[test]
    fn test_square_crop() {
        assert_eq!(square_crop(WIDE), Rect::new(500.0, 0.0, 1000.0, 1000.0));
        let tall = ImageSize {
            width: 400,
            height: 600,
        };
        assert_eq!(square_crop(tall), Rect::new(0.0, 100.0, 400.0, 400.0));
    }

    #[test]
    fn test_ready_size() {
        assert!(ready_size(&LoadedImage::ready(10, 20), ImageRole::Author).is_ok());
        assert!(matches!(
            ready_size(&LoadedImage::pending(), ImageRole::Background),
            Err(Error::ImageNotReady(ImageRole::Background))
        ));
        assert!(ready_size(&LoadedImage::ready(0, 20), ImageRole::Author).is_err());
    }
}
