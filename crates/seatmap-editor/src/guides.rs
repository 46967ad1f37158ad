//! Ephemeral guide lines drawn while a gesture is in flight.

use seatmap_core::Line;
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GuideOrientation {
    /// Constant x; marks a left/center/right alignment.
    Vertical,
    /// Constant y; marks a top/center/bottom alignment.
    Horizontal,
    /// Through an element's center at a standard angle.
    Angled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GuideStyle {
    Alignment,
    RotationExact,
    RotationNear,
}

/// A render-only line segment in world space. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub line: Line,
    pub orientation: GuideOrientation,
    pub style: GuideStyle,
}

/// At most one guide per axis, or one rotation guide.
pub type Guides = SmallVec<[GuideLine; 2]>;

/// Flat form of a [`GuideLine`] handed to the render host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideView {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub orientation: GuideOrientation,
    pub style: GuideStyle,
}

impl From<&GuideLine> for GuideView {
    fn from(guide: &GuideLine) -> Self {
        Self {
            x1: guide.line.p0.x,
            y1: guide.line.p0.y,
            x2: guide.line.p1.x,
            y2: guide.line.p1.y,
            orientation: guide.orientation,
            style: guide.style,
        }
    }
}
