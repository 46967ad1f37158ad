//! Rotation snapping to standard angles.

use crate::guides::{GuideLine, GuideOrientation, GuideStyle, Guides};
use seatmap_core::config::EditorConfig;
use seatmap_core::geometry::{circular_distance, normalize_angle};
use seatmap_core::{Line, Point, Vec2};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RotationSnap {
    pub guides: Guides,
    /// The standard angle to commit, when one is within the threshold.
    pub snapped_angle: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RotationSnapper {
    /// Ascending, all in `[0, 360)`.
    angles: Vec<f64>,
    threshold_deg: f64,
    exact_epsilon_deg: f64,
}

impl RotationSnapper {
    pub fn new(angles: Vec<f64>, threshold_deg: f64, exact_epsilon_deg: f64) -> Self {
        Self {
            angles,
            threshold_deg,
            exact_epsilon_deg,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.standard_angles(),
            config.rotation_snap_threshold_deg,
            config.rotation_exact_epsilon_deg,
        )
    }

    /// Nearest standard angle and its circular distance from `angle`.
    pub fn nearest(&self, angle: f64) -> Option<(f64, f64)> {
        let angle = normalize_angle(angle);
        let mut best: Option<(f64, f64)> = None;
        for &target in &self.angles {
            let d = circular_distance(angle, target);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((target, d));
            }
        }
        best
    }

    /// Angle to commit for a raw gesture angle: the snapped standard angle
    /// when within threshold, otherwise the normalized raw angle.
    pub fn resolve(&self, angle: f64) -> f64 {
        match self.nearest(angle) {
            Some((target, d)) if d <= self.threshold_deg => target,
            _ => normalize_angle(angle),
        }
    }

    /// Snap target plus a guide through `center` at that angle.
    /// `half_length` is the guide's reach on each side of the center.
    pub fn compute(&self, angle: f64, center: Point, half_length: f64) -> RotationSnap {
        let Some((target, d)) = self.nearest(angle) else {
            return RotationSnap::default();
        };
        if d > self.threshold_deg {
            return RotationSnap::default();
        }
        let style = if d < self.exact_epsilon_deg {
            GuideStyle::RotationExact
        } else {
            GuideStyle::RotationNear
        };
        let rad = target.to_radians();
        let reach = Vec2::new(rad.cos(), rad.sin()) * half_length;
        let mut guides = Guides::new();
        guides.push(GuideLine {
            line: Line::new(center - reach, center + reach),
            orientation: GuideOrientation::Angled,
            style,
        });
        RotationSnap {
            guides,
            snapped_angle: Some(target),
        }
    }
}

impl Default for RotationSnapper {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
