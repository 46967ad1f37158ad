//! Alignment snapping against neighbouring elements.
//!
//! Each box contributes three vertical stops (left, center, right) and three
//! horizontal stops (top, center, bottom). For every same-axis pair between
//! the active box and a candidate, the closest pair strictly inside the
//! threshold wins; x and y are decided independently. The scan is a plain
//! O(n) pass re-run on every pointer move.

use crate::guides::{GuideLine, GuideOrientation, GuideStyle, Guides};
use seatmap_core::geometry::{horizontal_stops, vertical_stops};
use seatmap_core::{Line, Point, Rect, Vec2};

/// Corrective offset for the active element. `None` means no snap on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapCorrection {
    pub dx: Option<f64>,
    pub dy: Option<f64>,
}

impl SnapCorrection {
    pub fn is_empty(&self) -> bool {
        self.dx.is_none() && self.dy.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapResult {
    pub guides: Guides,
    pub correction: SnapCorrection,
}

/// Best pairing found so far on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisMatch {
    distance: f64,
    /// Where the guide sits (the candidate's stop).
    guide: f64,
    /// `guide - active stop`.
    delta: f64,
    other: Rect,
}

#[derive(Debug, Clone, Copy)]
pub struct AlignmentSnapper {
    /// Snap distance in screen pixels.
    pub threshold_px: f64,
}

impl AlignmentSnapper {
    pub fn new(threshold_px: f64) -> Self {
        Self { threshold_px }
    }

    /// Find the best x and y alignment of `active` against `candidates`.
    ///
    /// `scale` is the current zoom; the world-space threshold is
    /// `threshold_px / scale` so the on-screen snap distance stays constant.
    pub fn compute<I>(&self, active: Rect, candidates: I, scale: f64) -> SnapResult
    where
        I: IntoIterator<Item = Rect>,
    {
        let limit = self.threshold_px / scale;
        let active_v = vertical_stops(active);
        let active_h = horizontal_stops(active);

        let mut best_x: Option<AxisMatch> = None;
        let mut best_y: Option<AxisMatch> = None;

        for other in candidates {
            scan_axis(&active_v, &vertical_stops(other), other, limit, &mut best_x);
            scan_axis(&active_h, &horizontal_stops(other), other, limit, &mut best_y);
        }

        let correction = SnapCorrection {
            dx: best_x.map(|m| m.delta),
            dy: best_y.map(|m| m.delta),
        };
        let snapped = active
            + Vec2::new(correction.dx.unwrap_or(0.0), correction.dy.unwrap_or(0.0));

        let mut guides = Guides::new();
        if let Some(m) = best_x {
            let top = snapped.y0.min(m.other.y0);
            let bottom = snapped.y1.max(m.other.y1);
            guides.push(GuideLine {
                line: Line::new(Point::new(m.guide, top), Point::new(m.guide, bottom)),
                orientation: GuideOrientation::Vertical,
                style: GuideStyle::Alignment,
            });
        }
        if let Some(m) = best_y {
            let left = snapped.x0.min(m.other.x0);
            let right = snapped.x1.max(m.other.x1);
            guides.push(GuideLine {
                line: Line::new(Point::new(left, m.guide), Point::new(right, m.guide)),
                orientation: GuideOrientation::Horizontal,
                style: GuideStyle::Alignment,
            });
        }

        log::trace!("snap: dx={:?} dy={:?}", correction.dx, correction.dy);
        SnapResult { guides, correction }
    }
}

fn scan_axis(
    active: &[f64; 3],
    other_stops: &[f64; 3],
    other: Rect,
    limit: f64,
    best: &mut Option<AxisMatch>,
) {
    for &a in active {
        for &o in other_stops {
            let distance = (a - o).abs();
            if distance >= limit {
                continue;
            }
            if best.is_some_and(|b| distance >= b.distance) {
                continue;
            }
            *best = Some(AxisMatch {
                distance,
                guide: o,
                delta: o - a,
                other,
            });
        }
    }
}
