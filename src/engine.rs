//! File and batch processing around the corner mask.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{info, warn};

use crate::classify::{ClassificationConfig, DEFAULT_COLOR_TOLERANCE};
use crate::error::{Error, Result};
use crate::geometry::validate_corner_ratio;
use crate::mask::mask_corners;
use crate::stats::RunStatistics;

/// Input file used when none is given.
pub const DEFAULT_INPUT: &str = "ic_launcher.png";

/// Output file used for [`DEFAULT_INPUT`].
pub const DEFAULT_OUTPUT: &str = "ic_launcher_transparent.png";

/// Default fraction of the width used as corner diameter.
pub const DEFAULT_CORNER_RATIO: f64 = 0.25;

/// Options controlling corner masking.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Corner diameter as a fraction of the image width, in `(0, 0.5]`.
    pub corner_ratio: f64,
    /// Per-channel shortfall from 255 still treated as background.
    pub color_tolerance: u8,
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            corner_ratio: DEFAULT_CORNER_RATIO,
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
            verbose: false,
            quiet: false,
        }
    }
}

impl ProcessOptions {
    /// Check the options without an image at hand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the corner ratio is out of range.
    pub fn validate(&self) -> Result<()> {
        validate_corner_ratio(self.corner_ratio)
    }

    /// Classifier settings derived from these options.
    #[must_use]
    pub fn classification(&self) -> ClassificationConfig {
        ClassificationConfig::new(self.color_tolerance)
    }
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Whether the file was skipped (image shape cannot be masked).
    pub skipped: bool,
    /// Statistics of the masking pass, if one ran.
    pub stats: Option<RunStatistics>,
    /// Human-readable status message.
    pub message: String,
}

impl ProcessResult {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            success: false,
            skipped: false,
            stats: None,
            message: String::new(),
        }
    }
}

/// Applies corner masks with a fixed set of options.
///
/// Options are validated once in [`CornerMaskEngine::new`]; image-dependent
/// checks run again per image before any pixel is written.
#[derive(Debug, Clone)]
pub struct CornerMaskEngine {
    opts: ProcessOptions,
}

impl CornerMaskEngine {
    /// Create an engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the corner ratio is out of range.
    pub fn new(opts: ProcessOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Options in use.
    #[must_use]
    pub fn options(&self) -> &ProcessOptions {
        &self.opts
    }

    /// Mask the corners of an image in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the image is empty or too
    /// narrow for a non-zero radius. The image is untouched in that case.
    pub fn mask(&self, image: &mut RgbaImage) -> Result<RunStatistics> {
        mask_corners(image, self.opts.corner_ratio, &self.opts.classification())
    }

    /// Process a single image file: load, mask, save.
    ///
    /// Returns a [`ProcessResult`] indicating success, skip, or failure.
    #[must_use]
    pub fn process_file(&self, input: &Path, output: &Path) -> ProcessResult {
        let mut result = ProcessResult::new(input);

        let dyn_img = match image::open(input) {
            Ok(img) => img,
            Err(e) => {
                result.message = format!("Failed to load: {e}");
                warn!("{}: {}", input.display(), result.message);
                return result;
            }
        };

        let mut rgba = normalize(dyn_img);

        let stats = match self.mask(&mut rgba) {
            Ok(stats) => stats,
            Err(e) => {
                result.skipped = true;
                result.success = true;
                result.message = format!(
                    "Cannot mask {}x{} image: {e}",
                    rgba.width(),
                    rgba.height()
                );
                warn!("{}: {}", input.display(), result.message);
                return result;
            }
        };

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    warn!("{}: {}", parent.display(), result.message);
                    return result;
                }
            }
        }

        match save_image(&rgba, output) {
            Ok(()) => {
                info!(
                    "{} -> {}: {} pixels made transparent",
                    input.display(),
                    output.display(),
                    stats.transparent()
                );
                result.success = true;
                result.message = "Corners masked".to_string();
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
                warn!("{}: {}", output.display(), result.message);
            }
        }
        result.stats = Some(stats);

        result
    }

    /// Process all supported images in a directory.
    ///
    /// Outputs keep the input file stem and are always written as PNG.
    /// Uses parallel iteration when the `cli` feature is enabled (via rayon).
    #[must_use]
    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Vec<ProcessResult> {
        let entries: Vec<PathBuf> = match std::fs::read_dir(input_dir) {
            Ok(rd) => rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|e| e.path())
                .filter(|p| is_supported_image(p))
                .collect(),
            Err(e) => {
                let mut result = ProcessResult::new(input_dir);
                result.message = format!("Failed to read directory: {e}");
                return vec![result];
            }
        };

        if !output_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(output_dir) {
                let mut result = ProcessResult::new(output_dir);
                result.message = format!("Failed to create output directory: {e}");
                return vec![result];
            }
        }

        let output_for = |input: &Path| {
            let mut name = input.file_stem().unwrap_or_default().to_os_string();
            name.push(".png");
            output_dir.join(name)
        };

        #[cfg(feature = "cli")]
        {
            use rayon::prelude::*;
            entries
                .par_iter()
                .map(|input| self.process_file(input, &output_for(input)))
                .collect()
        }

        #[cfg(not(feature = "cli"))]
        {
            entries
                .iter()
                .map(|input| self.process_file(input, &output_for(input)))
                .collect()
        }
    }
}

/// Lift any decoded image to 8-bit RGBA. Missing alpha becomes 255.
#[must_use]
pub fn normalize(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => other.to_rgba8(),
    }
}

/// Check if a file has a supported input image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "png" | "jpg" | "jpeg" | "webp" | "bmp" | "tif" | "tiff"
        ),
        None => false,
    }
}

/// Save an RGBA image in a format that keeps the alpha channel.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for formats without alpha (such as
/// JPEG) or unknown extensions, and an I/O or encoding error if writing fails.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tiff => {
            img.save_with_format(path, format)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!(
                "{format:?} cannot store transparency"
            )));
        }
    }

    Ok(())
}

/// Generate a default output path from an input path.
///
/// Example: `"icon.jpg"` becomes `"icon_transparent.png"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new(""));
    parent.join(format!("{stem}_transparent.png"))
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba};

    use super::*;

    #[test]
    fn default_options() {
        let opts = ProcessOptions::default();
        assert!((opts.corner_ratio - 0.25).abs() < f64::EPSILON);
        assert_eq!(opts.color_tolerance, 50);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn engine_rejects_bad_ratio() {
        let opts = ProcessOptions {
            corner_ratio: 0.75,
            ..ProcessOptions::default()
        };
        assert!(matches!(
            CornerMaskEngine::new(opts),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn engine_rejects_tiny_image_without_touching_it() {
        let engine = CornerMaskEngine::new(ProcessOptions::default()).unwrap();
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let before = img.clone();
        assert!(engine.mask(&mut img).is_err());
        assert_eq!(img, before);
    }

    #[test]
    fn engine_mask_matches_mask_corners() {
        let opts = ProcessOptions {
            corner_ratio: 0.4,
            color_tolerance: 10,
            ..ProcessOptions::default()
        };
        let engine = CornerMaskEngine::new(opts.clone()).unwrap();
        let mut img = RgbaImage::from_pixel(90, 60, Rgba([250, 250, 250, 255]));
        let mut expected_img = img.clone();

        let stats = engine.mask(&mut img).unwrap();
        let expected =
            mask_corners(&mut expected_img, opts.corner_ratio, &opts.classification()).unwrap();
        assert_eq!(img, expected_img);
        assert_eq!(stats, expected);
    }

    #[test]
    fn process_file_fails_when_output_directory_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("icon.png");
        RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]))
            .save(&input)
            .unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();

        let engine = CornerMaskEngine::new(ProcessOptions::default()).unwrap();
        let result = engine.process_file(&input, &blocker.join("out.png"));
        assert!(!result.success);
        assert!(!result.skipped);
        assert!(result.message.starts_with("Failed to create output directory"));
    }

    #[test]
    fn normalize_lifts_rgb_to_opaque_rgba() {
        let rgb = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let rgba = normalize(DynamicImage::ImageRgb8(rgb));
        assert!(rgba.pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn default_output_path_appends_transparent_suffix() {
        assert_eq!(
            default_output_path(Path::new(DEFAULT_INPUT)),
            PathBuf::from(DEFAULT_OUTPUT)
        );
        assert_eq!(
            default_output_path(Path::new("/tmp/icon.jpg")),
            PathBuf::from("/tmp/icon_transparent.png")
        );
    }

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("icon.png")));
        assert!(is_supported_image(Path::new("icon.JPG")));
        assert!(is_supported_image(Path::new("icon.webp")));
        assert!(is_supported_image(Path::new("icon.tiff")));
        assert!(!is_supported_image(Path::new("icon.gif")));
        assert!(!is_supported_image(Path::new("icon")));
    }

    #[test]
    fn save_image_refuses_formats_without_alpha() {
        let img = RgbaImage::new(2, 2);
        assert!(matches!(
            save_image(&img, Path::new("out.jpg")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            save_image(&img, Path::new("out.unknown")),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
