//! Corner region geometry.
//!
//! Each icon corner is approximated by a circle of radius
//! `floor(width * corner_ratio) / 2`, inset from the geometric corner by that
//! radius along both axes. The width is the single reference dimension, so
//! square icons get identical rounding on every corner.

use std::fmt;

use crate::error::{Error, Result};

/// Largest accepted corner ratio. Above this the corner discs of a square
/// image would overlap.
pub const MAX_CORNER_RATIO: f64 = 0.5;

/// How far outside the `u32` pixel range a region center may sit.
#[allow(clippy::cast_lossless)]
pub const MAX_CENTER_OFFSET: i64 = u32::MAX as i64;

/// One of the four image corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Upper-left corner.
    TopLeft,
    /// Upper-right corner.
    TopRight,
    /// Lower-left corner.
    BottomLeft,
    /// Lower-right corner.
    BottomRight,
}

impl Corner {
    /// All corners, in processing order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }

    /// Position of this corner in [`Corner::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Half-open pixel rectangle `[x1, x2) x [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// First column (inclusive).
    pub x1: u32,
    /// First row (inclusive).
    pub y1: u32,
    /// Last column (exclusive).
    pub x2: u32,
    /// Last row (exclusive).
    pub y2: u32,
}

impl BoundingBox {
    /// Number of pixels covered.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.x2 - self.x1) * u64::from(self.y2 - self.y1)
    }
}

/// A circular corner region.
///
/// Centers are signed so that clipping against the image never underflows,
/// even for images much wider than they are tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerRegion {
    /// Which corner this region masks.
    pub corner: Corner,
    /// Center column.
    pub cx: i64,
    /// Center row.
    pub cy: i64,
    /// Radius in pixels. Always positive for regions built by [`corner_regions`].
    pub radius: u32,
}

impl CornerRegion {
    /// Bounding box of the disc `[cx - r, cx + r) x [cy - r, cy + r)`, clipped to
    /// the image. Returns `None` if nothing of it lies inside the image.
    #[must_use]
    pub fn bounding_box(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let r = i64::from(self.radius);
        let clip = |lo: i64, hi: i64, extent: u32| -> Option<(u32, u32)> {
            let lo = lo.max(0);
            let hi = hi.min(i64::from(extent));
            if lo >= hi {
                return None;
            }
            // Both bounds are within [0, extent] here.
            Some((u32::try_from(lo).ok()?, u32::try_from(hi).ok()?))
        };

        let (x1, x2) = clip(self.cx.saturating_sub(r), self.cx.saturating_add(r), width)?;
        let (y1, y2) = clip(self.cy.saturating_sub(r), self.cy.saturating_add(r), height)?;
        Some(BoundingBox { x1, y1, x2, y2 })
    }

    /// Closed disc test: `true` if `(x, y)` lies at distance `<= radius` from
    /// the center.
    ///
    /// Compares squared integer distances, which is exact where a floating
    /// `sqrt` comparison is not.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        // Widened so that any center, however far off, cannot overflow.
        let dx = (i128::from(x) - i128::from(self.cx)).unsigned_abs();
        let dy = (i128::from(y) - i128::from(self.cy)).unsigned_abs();
        let r = u128::from(self.radius);
        dx * dx + dy * dy <= r * r
    }
}

/// Check a hand-built region set before masking with it.
///
/// Each corner must appear exactly once, every radius must be positive, and
/// every center must lie within [`MAX_CENTER_OFFSET`] of the `u32` pixel range.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] describing the first bad region.
pub fn validate_regions(regions: &[CornerRegion; 4]) -> Result<()> {
    for corner in Corner::ALL {
        let count = regions.iter().filter(|r| r.corner == corner).count();
        if count != 1 {
            return Err(Error::InvalidConfiguration(format!(
                "expected one {corner} region, found {count}"
            )));
        }
    }

    let centers = -MAX_CENTER_OFFSET..=i64::from(u32::MAX) + MAX_CENTER_OFFSET;
    for region in regions {
        if region.radius == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "{} region has a zero radius",
                region.corner
            )));
        }
        if !centers.contains(&region.cx) || !centers.contains(&region.cy) {
            return Err(Error::InvalidConfiguration(format!(
                "{} region center ({}, {}) is out of range",
                region.corner, region.cx, region.cy
            )));
        }
    }
    Ok(())
}

/// Check that `corner_ratio` lies in `(0, 0.5]`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] for values outside the range,
/// including NaN and infinities.
pub fn validate_corner_ratio(corner_ratio: f64) -> Result<()> {
    if corner_ratio > 0.0 && corner_ratio <= MAX_CORNER_RATIO {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "corner ratio {corner_ratio} outside (0, {MAX_CORNER_RATIO}]"
        )))
    }
}

/// Corner radius for an image of the given width.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if the ratio is out of range or the
/// radius rounds down to zero.
pub fn corner_radius(width: u32, corner_ratio: f64) -> Result<u32> {
    validate_corner_ratio(corner_ratio)?;

    // width * ratio <= width / 2, so the cast cannot overflow.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let diameter = (f64::from(width) * corner_ratio).floor() as u32;
    let radius = diameter / 2;
    if radius == 0 {
        return Err(Error::InvalidConfiguration(format!(
            "corner ratio {corner_ratio} gives a zero radius for width {width}"
        )));
    }
    Ok(radius)
}

/// Derive the four corner regions for an image.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if either dimension is zero, the
/// ratio is outside `(0, 0.5]`, or the derived radius is zero.
pub fn corner_regions(width: u32, height: u32, corner_ratio: f64) -> Result<[CornerRegion; 4]> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidConfiguration(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    let radius = corner_radius(width, corner_ratio)?;

    let r = i64::from(radius);
    let (w, h) = (i64::from(width), i64::from(height));
    Ok(Corner::ALL.map(|corner| {
        let (cx, cy) = match corner {
            Corner::TopLeft => (r, r),
            Corner::TopRight => (w - r, r),
            Corner::BottomLeft => (r, h - r),
            Corner::BottomRight => (w - r, h - r),
        };
        CornerRegion {
            corner,
            cx,
            cy,
            radius,
        }
    }))
}
