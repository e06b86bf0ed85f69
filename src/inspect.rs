//! Inspection of masked icons.
//!
//! Samples a fixed set of points around each corner disc and counts fully
//! transparent pixels, to check an output file without opening an editor.

use std::fmt;

use image::{Rgba, RgbaImage};

use crate::geometry::{Corner, CornerRegion};

/// Distance beyond the circle at which the exterior probe is taken.
const EXTERIOR_OFFSET: i64 = 10;

/// Where a probe point sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Center of a corner disc.
    Center,
    /// On the circle, left of the center.
    LeftEdge,
    /// On the circle, right of the center.
    RightEdge,
    /// On the circle, above the center.
    TopEdge,
    /// On the circle, below the center.
    BottomEdge,
    /// Halfway between center and the upper-left of the circle.
    Interior,
    /// Just outside the circle, left of the center.
    Exterior,
    /// Center of the image.
    ImageCenter,
    /// Middle of the top edge.
    TopMiddle,
    /// Middle of the bottom edge.
    BottomMiddle,
    /// Middle of the left edge.
    LeftMiddle,
    /// Middle of the right edge.
    RightMiddle,
}

/// A pixel position to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePoint {
    /// Corner the point belongs to, `None` for image-level points.
    pub corner: Option<Corner>,
    /// Role of the point.
    pub kind: ProbeKind,
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

/// A sampled probe point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// The sampled point.
    pub point: ProbePoint,
    /// Pixel value found there.
    pub pixel: Rgba<u8>,
}

impl ProbeResult {
    /// `true` if the pixel is fully transparent.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.pixel[3] == 0
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.pixel.0;
        let corner = self.point.corner.map_or("image", Corner::label);
        let state = if self.is_transparent() {
            "transparent".to_string()
        } else {
            format!("opaque (alpha={a})")
        };
        write!(
            f,
            "{corner} {:?} ({}, {}): RGB({r},{g},{b}) {state}",
            self.point.kind, self.point.x, self.point.y
        )
    }
}

/// Count of fully transparent pixels in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparencySummary {
    /// Number of pixels.
    pub total: u64,
    /// Pixels with `alpha == 0`.
    pub transparent: u64,
}

impl TransparencySummary {
    /// Transparent share in percent, `0.0` for an empty image.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.transparent as f64 / self.total as f64 * 100.0
        }
    }
}

/// Probe points for each region plus the image center and edge midpoints.
///
/// Points that fall outside a `width` x `height` image are dropped.
#[must_use]
pub fn probe_points(width: u32, height: u32, regions: &[CornerRegion; 4]) -> Vec<ProbePoint> {
    let mut points = Vec::with_capacity(regions.len() * 7 + 5);
    let mut push = |corner, kind, x: i64, y: i64| {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            if x < width && y < height {
                points.push(ProbePoint { corner, kind, x, y });
            }
        }
    };

    for region in regions {
        let (cx, cy, r) = (region.cx, region.cy, i64::from(region.radius));
        let c = Some(region.corner);
        push(c, ProbeKind::Center, cx, cy);
        push(c, ProbeKind::LeftEdge, cx.saturating_sub(r), cy);
        push(c, ProbeKind::RightEdge, cx.saturating_add(r), cy);
        push(c, ProbeKind::TopEdge, cx, cy.saturating_sub(r));
        push(c, ProbeKind::BottomEdge, cx, cy.saturating_add(r));
        push(c, ProbeKind::Interior, cx.saturating_sub(r / 2), cy.saturating_sub(r / 2));
        push(
            c,
            ProbeKind::Exterior,
            cx.saturating_sub(r + EXTERIOR_OFFSET),
            cy,
        );
    }

    let (w, h) = (i64::from(width), i64::from(height));
    push(None, ProbeKind::ImageCenter, w / 2, h / 2);
    push(None, ProbeKind::TopMiddle, w / 2, 0);
    push(None, ProbeKind::BottomMiddle, w / 2, h - 1);
    push(None, ProbeKind::LeftMiddle, 0, h / 2);
    push(None, ProbeKind::RightMiddle, w - 1, h / 2);

    points
}

/// Sample `points` from `image`. Points outside the image are skipped.
#[must_use]
pub fn probe(image: &RgbaImage, points: &[ProbePoint]) -> Vec<ProbeResult> {
    points
        .iter()
        .filter_map(|&point| {
            image
                .get_pixel_checked(point.x, point.y)
                .map(|&pixel| ProbeResult { point, pixel })
        })
        .collect()
}

/// Count fully transparent pixels across the whole image.
#[must_use]
pub fn transparency_summary(image: &RgbaImage) -> TransparencySummary {
    let transparent = image.pixels().filter(|p| p[3] == 0).count() as u64;
    TransparencySummary {
        total: u64::from(image.width()) * u64::from(image.height()),
        transparent,
    }
}

/// The four extreme corner pixels, or `None` for an empty image.
#[must_use]
pub fn corner_pixels(image: &RgbaImage) -> Option<[(Corner, Rgba<u8>); 4]> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    Some(Corner::ALL.map(|corner| {
        let (x, y) = match corner {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (w - 1, 0),
            Corner::BottomLeft => (0, h - 1),
            Corner::BottomRight => (w - 1, h - 1),
        };
        (corner, *image.get_pixel(x, y))
    }))
}
