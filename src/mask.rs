//! Corner alpha masking.
//!
//! For every corner region, walks the clipped bounding box of its disc row by
//! row over the raw RGBA buffer. Pixels inside the disc that classify as
//! background get `alpha = 0`; their RGB values are left as they were.

use image::RgbaImage;
use log::debug;

use crate::classify::{is_background, ClassificationConfig};
use crate::error::Result;
use crate::geometry::{corner_regions, validate_regions, CornerRegion};
use crate::stats::RunStatistics;

const CHANNELS: usize = 4;
const ALPHA: usize = 3;

/// Apply the corner mask in place using precomputed regions.
///
/// Regions are independent: each pixel is rewritten at most to `alpha = 0`,
/// so region order, overlapping regions and repeated passes all give the same
/// buffer and statistics.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfiguration`] if the region set fails
/// [`validate_regions`]. The image is not modified in that case.
pub fn apply_corner_mask(
    image: &mut RgbaImage,
    regions: &[CornerRegion; 4],
    config: &ClassificationConfig,
) -> Result<RunStatistics> {
    validate_regions(regions)?;

    let (width, height) = image.dimensions();
    let mut stats = RunStatistics::new(width, height, regions);
    let row_len = width as usize * CHANNELS;
    let samples: &mut [u8] = image;

    for region in regions {
        let Some(bbox) = region.bounding_box(width, height) else {
            debug!("{}: region lies outside the image", region.corner);
            continue;
        };

        let rows = (0u32..)
            .zip(samples.chunks_exact_mut(row_len))
            .skip(bbox.y1 as usize)
            .take((bbox.y2 - bbox.y1) as usize);

        for (y, row) in rows {
            let span = &mut row[bbox.x1 as usize * CHANNELS..bbox.x2 as usize * CHANNELS];
            for (x, px) in (bbox.x1..).zip(span.chunks_exact_mut(CHANNELS)) {
                if !region.contains(x, y) {
                    continue;
                }
                let background = is_background([px[0], px[1], px[2]], config.color_tolerance);
                if background {
                    px[ALPHA] = 0;
                }
                stats.record(region.corner, background);
            }
        }

        let counts = stats.region(region.corner);
        debug!(
            "{}: center ({}, {}) radius {}, {}/{} transparent",
            region.corner, region.cx, region.cy, region.radius, counts.transparent, counts.tested
        );
    }

    Ok(stats)
}

/// Derive the corner regions for `image` and mask them.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfiguration`] if the regions cannot be
/// derived. The image is not modified in that case.
pub fn mask_corners(
    image: &mut RgbaImage,
    corner_ratio: f64,
    config: &ClassificationConfig,
) -> Result<RunStatistics> {
    let regions = corner_regions(image.width(), image.height(), corner_ratio)?;
    apply_corner_mask(image, &regions, config)
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::geometry::Corner;
    use crate::Error;

    fn filled(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn white_corners_become_transparent() {
        let mut img = filled(400, 400, [255, 255, 255, 255]);
        let stats = mask_corners(&mut img, 0.25, &ClassificationConfig::default()).unwrap();

        assert_eq!(img.get_pixel(50, 50).0, [255, 255, 255, 0]);
        assert_eq!(img.get_pixel(0, 50).0, [255, 255, 255, 0]);
        assert_eq!(img.get_pixel(399, 350).0, [255, 255, 255, 0]);
        // Extreme corner pixel lies outside the disc.
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(200, 0).0, [255, 255, 255, 255]);

        for corner in Corner::ALL {
            let r = stats.region(corner);
            assert!(r.tested > 0);
            assert_eq!(r.tested, r.transparent);
        }
    }

    #[test]
    fn only_alpha_is_rewritten() {
        let mut img = filled(64, 64, [230, 240, 250, 200]);
        mask_corners(&mut img, 0.5, &ClassificationConfig::new(50)).unwrap();
        assert_eq!(img.get_pixel(16, 16).0, [230, 240, 250, 0]);
    }

    #[test]
    fn dark_pixels_are_counted_but_kept() {
        let mut img = filled(100, 100, [0, 0, 0, 255]);
        let stats = mask_corners(&mut img, 0.5, &ClassificationConfig::new(254)).unwrap();
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
        assert!(stats.tested() > 0);
        assert_eq!(stats.transparent(), 0);
    }

    #[test]
    fn tested_counts_match_disc_area() {
        let mut img = filled(400, 400, [255, 255, 255, 255]);
        let regions = corner_regions(400, 400, 0.25).unwrap();
        let stats =
            apply_corner_mask(&mut img, &regions, &ClassificationConfig::default()).unwrap();

        for region in &regions {
            let bbox = region.bounding_box(400, 400).unwrap();
            let expected = (bbox.y1..bbox.y2)
                .flat_map(|y| (bbox.x1..bbox.x2).map(move |x| (x, y)))
                .filter(|&(x, y)| region.contains(x, y))
                .count() as u64;
            assert_eq!(stats.region(region.corner).tested, expected);
        }
    }

    #[test]
    fn invalid_ratio_leaves_buffer_untouched() {
        let mut img = filled(400, 400, [255, 255, 255, 255]);
        let before = img.clone();
        for ratio in [0.0, 0.6] {
            let err = mask_corners(&mut img, ratio, &ClassificationConfig::default());
            assert!(matches!(err, Err(Error::InvalidConfiguration(_))));
            assert_eq!(img, before);
        }
    }

    #[test]
    fn near_white_with_zero_tolerance_is_untouched() {
        let mut img = filled(120, 120, [254, 254, 254, 255]);
        let before = img.clone();
        let stats = mask_corners(&mut img, 0.25, &ClassificationConfig::new(0)).unwrap();
        assert_eq!(img, before);
        assert_eq!(stats.transparent(), 0);
    }

    #[test]
    fn reversed_regions_keep_their_labels() {
        // White icon whose top-left quadrant is black.
        let mut img = filled(400, 400, [255, 255, 255, 255]);
        for y in 0..200 {
            for x in 0..200 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let mut reversed_img = img.clone();

        let regions = corner_regions(400, 400, 0.25).unwrap();
        let mut reversed = regions;
        reversed.reverse();

        let config = ClassificationConfig::default();
        let stats = apply_corner_mask(&mut img, &regions, &config).unwrap();
        let reversed_stats = apply_corner_mask(&mut reversed_img, &reversed, &config).unwrap();

        assert_eq!(img, reversed_img);
        assert_eq!(stats, reversed_stats);

        let tl = reversed_stats.region(Corner::TopLeft);
        assert_eq!(tl.corner, Corner::TopLeft);
        assert_eq!(tl.center, (50, 50));
        assert!(tl.tested > 0);
        assert_eq!(tl.transparent, 0);

        let br = reversed_stats.region(Corner::BottomRight);
        assert_eq!(br.corner, Corner::BottomRight);
        assert_eq!(br.tested, br.transparent);
    }

    #[test]
    fn malformed_regions_leave_buffer_untouched() {
        let mut img = filled(400, 400, [255, 255, 255, 255]);
        let before = img.clone();
        let config = ClassificationConfig::default();

        let far = CornerRegion {
            corner: Corner::TopLeft,
            cx: i64::MAX - 1,
            cy: 0,
            radius: 5,
        };
        let result = apply_corner_mask(&mut img, &[far; 4], &config);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        assert_eq!(img, before);

        let mut zero_radius = corner_regions(400, 400, 0.25).unwrap();
        zero_radius[1].radius = 0;
        assert!(apply_corner_mask(&mut img, &zero_radius, &config).is_err());
        assert_eq!(img, before);
    }

    #[test]
    fn wide_image_is_clipped_without_panicking() {
        let mut img = filled(1000, 10, [255, 255, 255, 255]);
        let stats = mask_corners(&mut img, 0.5, &ClassificationConfig::default()).unwrap();
        assert!(stats.transparent() > 0);
        assert_eq!(img.get_pixel(500, 5).0[3], 255);
    }
}
