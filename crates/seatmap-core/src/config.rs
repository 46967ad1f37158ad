//! Editor tuning knobs.
//!
//! Hosts may ship a JSON blob with any subset of these keys; missing keys
//! fall back to [`EditorConfig::default`].

use crate::error::LayoutError;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest width/height any element may have after a transform, in world units.
pub const MIN_SIZE: f64 = 5.0;

/// Finest accepted spacing of standard rotation angles, in degrees.
pub const MIN_ROTATION_STEP_DEG: f64 = 1.0;

/// Configuration for the interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Alignment snap distance in *screen* pixels. Divided by the zoom scale
    /// before comparing world distances. Default: **5**.
    pub snap_threshold_px: f64,

    /// Rotation snap distance in degrees. Default: **5**.
    pub rotation_snap_threshold_deg: f64,

    /// Below this distance a rotation snap is styled as exact. Default: **0.5**.
    pub rotation_exact_epsilon_deg: f64,

    /// Spacing of the standard rotation angles. Default: **45** (0, 45, … 315).
    pub rotation_step_deg: f64,

    /// Minimum element width/height. Default: [`MIN_SIZE`].
    pub min_size: f64,

    pub min_scale: f64,
    pub max_scale: f64,

    /// Multiplicative zoom per wheel notch. Default: **1.05**.
    pub zoom_step: f64,

    /// Offset of a pasted element from the pointer, in world units.
    pub paste_offset: Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold_px: 5.0,
            rotation_snap_threshold_deg: 5.0,
            rotation_exact_epsilon_deg: 0.5,
            rotation_step_deg: 45.0,
            min_size: MIN_SIZE,
            min_scale: 0.1,
            max_scale: 5.0,
            zoom_step: 1.05,
            paste_offset: Offset { x: 10.0, y: 10.0 },
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    /// Returns [`LayoutError::Decode`] for malformed JSON and
    /// [`LayoutError::InvalidConfig`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidConfig`] naming the first bad key.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("snapThresholdPx", self.snap_threshold_px),
            ("rotationSnapThresholdDeg", self.rotation_snap_threshold_deg),
            ("rotationStepDeg", self.rotation_step_deg),
            ("minSize", self.min_size),
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidConfig(format!(
                    "{key} must be a positive number, got {value}"
                )));
            }
        }
        if self.rotation_step_deg < MIN_ROTATION_STEP_DEG {
            return Err(LayoutError::InvalidConfig(format!(
                "rotationStepDeg must be at least {MIN_ROTATION_STEP_DEG}, got {}",
                self.rotation_step_deg
            )));
        }
        if self.rotation_exact_epsilon_deg < 0.0 {
            return Err(LayoutError::InvalidConfig(
                "rotationExactEpsilonDeg must not be negative".to_string(),
            ));
        }
        if self.min_scale > self.max_scale {
            return Err(LayoutError::InvalidConfig(format!(
                "minScale ({}) exceeds maxScale ({})",
                self.min_scale, self.max_scale
            )));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "zoomStep must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }

    /// The standard rotation angles in ascending order, starting at 0.
    pub fn standard_angles(&self) -> Vec<f64> {
        let count = (360.0 / self.rotation_step_deg).ceil() as usize;
        (0..count)
            .map(|i| i as f64 * self.rotation_step_deg)
            .filter(|a| *a < 360.0)
            .collect()
    }
}
