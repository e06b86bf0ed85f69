//! Background pixel classification.
//!
//! A pixel is background when each of its RGB channels is within
//! `color_tolerance` of full brightness. Alpha is never consulted.

use image::Rgba;

/// Default per-channel tolerance.
pub const DEFAULT_COLOR_TOLERANCE: u8 = 50;

/// Parameters of the background classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationConfig {
    /// Maximum shortfall from 255 a channel may have and still count as
    /// background. `0` accepts only pure white, `255` accepts everything.
    pub color_tolerance: u8,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
        }
    }
}

impl ClassificationConfig {
    /// Create a classifier with the given tolerance.
    #[must_use]
    pub fn new(color_tolerance: u8) -> Self {
        Self { color_tolerance }
    }

    /// Smallest channel value still accepted as background.
    #[must_use]
    pub fn floor(&self) -> u8 {
        u8::MAX - self.color_tolerance
    }

    /// Classify an RGBA pixel, ignoring its alpha.
    #[must_use]
    pub fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        let [r, g, b, _] = pixel.0;
        is_background([r, g, b], self.color_tolerance)
    }
}

/// `true` if every channel is at least `255 - tolerance`.
#[must_use]
pub fn is_background(rgb: [u8; 3], tolerance: u8) -> bool {
    let floor = u8::MAX - tolerance;
    rgb.iter().all(|&c| c >= floor)
}
