//! Make the background corners of launcher icons transparent.
//!
//! Icons exported on an opaque white canvas look wrong on platforms that do not
//! apply their own corner mask. This crate fits a circle into each of the four
//! corners, sized from the image width, and sets `alpha = 0` on every
//! near-white pixel inside those circles. Everything else is left untouched.
//!
//! # Quick Start
//!
//! ```no_run
//! use icon_corner_mask::{CornerMaskEngine, ProcessOptions};
//!
//! let engine = CornerMaskEngine::new(ProcessOptions::default()).expect("valid options");
//! let mut img = image::open("ic_launcher.png").unwrap().to_rgba8();
//! let stats = engine.mask(&mut img).expect("image large enough");
//! println!("{stats}");
//! img.save("ic_launcher_transparent.png").unwrap();
//! ```
//!
//! # Lower-level API
//!
//! Regions and classification can be driven directly:
//!
//! ```
//! use icon_corner_mask::{apply_corner_mask, corner_regions, ClassificationConfig};
//! use image::{Rgba, RgbaImage};
//!
//! let mut img = RgbaImage::from_pixel(400, 400, Rgba([255, 255, 255, 255]));
//! let regions = corner_regions(400, 400, 0.25).unwrap();
//! let stats = apply_corner_mask(&mut img, &regions, &ClassificationConfig::new(50)).unwrap();
//!
//! assert_eq!(img.get_pixel(50, 50)[3], 0);
//! assert_eq!(img.get_pixel(200, 0)[3], 255);
//! assert_eq!(stats.tested(), stats.transparent());
//! ```

#![deny(missing_docs)]

pub mod classify;
mod engine;
pub mod error;
pub mod geometry;
pub mod inspect;
pub mod mask;
pub mod stats;

pub use classify::{is_background, ClassificationConfig};
pub use engine::{
    default_output_path, is_supported_image, normalize, save_image, CornerMaskEngine,
    ProcessOptions, ProcessResult, DEFAULT_CORNER_RATIO, DEFAULT_INPUT, DEFAULT_OUTPUT,
};
pub use error::{Error, Result};
pub use geometry::{corner_regions, validate_regions, Corner, CornerRegion};
pub use mask::{apply_corner_mask, mask_corners};
pub use stats::{RegionStats, RunStatistics};
