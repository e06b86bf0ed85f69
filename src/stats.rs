//! Per-pass masking statistics.

use std::fmt;

use crate::geometry::{Corner, CornerRegion};

/// Counts for a single corner region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStats {
    /// Corner the counts belong to.
    pub corner: Corner,
    /// Region center `(x, y)`.
    pub center: (i64, i64),
    /// Region radius.
    pub radius: u32,
    /// Pixels inside the disc that were classified.
    pub tested: u64,
    /// Pixels whose alpha was set to zero.
    pub transparent: u64,
}

impl RegionStats {
    /// Empty counts for a region.
    #[must_use]
    pub fn new(region: &CornerRegion) -> Self {
        Self {
            corner: region.corner,
            center: (region.cx, region.cy),
            radius: region.radius,
            tested: 0,
            transparent: 0,
        }
    }

    /// Share of tested pixels made transparent, in percent. `0.0` if nothing
    /// was tested.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        percentage(self.transparent, self.tested)
    }
}

/// Statistics of one masking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Counts per corner, indexed by [`Corner::index`].
    pub regions: [RegionStats; 4],
}

impl RunStatistics {
    /// Zeroed statistics for the given image and regions.
    ///
    /// Entries are stored in [`Corner::ALL`] order whatever order `regions`
    /// comes in, so a set with one region per corner lands at
    /// [`Corner::index`].
    #[must_use]
    pub fn new(width: u32, height: u32, regions: &[CornerRegion; 4]) -> Self {
        let mut stats = regions.map(|r| RegionStats::new(&r));
        stats.sort_by_key(|s| s.corner.index());
        Self {
            width,
            height,
            regions: stats,
        }
    }

    /// Record one classified pixel of `corner`.
    pub fn record(&mut self, corner: Corner, made_transparent: bool) {
        let region = &mut self.regions[corner.index()];
        region.tested += 1;
        if made_transparent {
            region.transparent += 1;
        }
    }

    /// Counts for one corner.
    #[must_use]
    pub fn region(&self, corner: Corner) -> &RegionStats {
        &self.regions[corner.index()]
    }

    /// Pixels tested across all corners.
    #[must_use]
    pub fn tested(&self) -> u64 {
        self.regions.iter().map(|r| r.tested).sum()
    }

    /// Pixels made transparent across all corners.
    #[must_use]
    pub fn transparent(&self) -> u64 {
        self.regions.iter().map(|r| r.transparent).sum()
    }

    /// Share of tested pixels made transparent, in percent.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        percentage(self.transparent(), self.tested())
    }

    /// Number of pixels in the image.
    #[must_use]
    pub fn total_pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Share of the whole image made transparent by this pass, in percent.
    #[must_use]
    pub fn image_percentage(&self) -> f64 {
        percentage(self.transparent(), self.total_pixels())
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.regions {
            writeln!(
                f,
                "{:<12} center ({}, {}) radius {}: {}/{} transparent ({:.1}%)",
                r.corner.label(),
                r.center.0,
                r.center.1,
                r.radius,
                r.transparent,
                r.tested,
                r.percentage(),
            )?;
        }
        write!(
            f,
            "total: {} of {} pixels transparent ({:.2}% of image, {:.1}% of corners)",
            self.transparent(),
            self.total_pixels(),
            self.image_percentage(),
            self.percentage(),
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::corner_regions;

    fn stats() -> RunStatistics {
        let regions = corner_regions(100, 100, 0.5).unwrap();
        RunStatistics::new(100, 100, &regions)
    }

    #[test]
    fn record_accumulates_per_corner() {
        let mut s = stats();
        s.record(Corner::TopLeft, true);
        s.record(Corner::TopLeft, false);
        s.record(Corner::BottomRight, true);

        assert_eq!(s.region(Corner::TopLeft).tested, 2);
        assert_eq!(s.region(Corner::TopLeft).transparent, 1);
        assert_eq!(s.region(Corner::TopRight).tested, 0);
        assert_eq!(s.tested(), 3);
        assert_eq!(s.transparent(), 2);
        assert!((s.region(Corner::TopLeft).percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn regions_are_filed_by_corner() {
        let mut regions = corner_regions(100, 100, 0.5).unwrap();
        regions.reverse();
        let mut s = RunStatistics::new(100, 100, &regions);
        s.record(Corner::TopLeft, true);

        for corner in Corner::ALL {
            assert_eq!(s.region(corner).corner, corner);
        }
        assert_eq!(s.region(Corner::TopLeft).center, (25, 25));
        assert_eq!(s.region(Corner::TopLeft).transparent, 1);
        assert_eq!(s.region(Corner::BottomRight).tested, 0);
    }

    #[test]
    fn empty_region_reports_zero_percent() {
        let s = stats();
        assert!(s.region(Corner::BottomLeft).percentage().abs() < f64::EPSILON);
        assert!(s.percentage().abs() < f64::EPSILON);
    }

    #[test]
    fn image_percentage_uses_all_pixels() {
        let mut s = stats();
        for _ in 0..100 {
            s.record(Corner::TopRight, true);
        }
        assert_eq!(s.total_pixels(), 10_000);
        assert!((s.image_percentage() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn display_lists_every_corner() {
        let mut s = stats();
        s.record(Corner::TopLeft, true);
        let text = s.to_string();
        for corner in Corner::ALL {
            assert!(text.contains(corner.label()));
        }
        assert!(text.contains("1/1 transparent"));
        assert!(text.contains("total: 1 of 10000"));
    }
}
