//! Pan/zoom state and screen ↔ world conversion.
//!
//! `screen = world * scale + pan`, so `world = (screen - pan) / scale`.

use crate::config::EditorConfig;
use kurbo::{Point, Size, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas size in screen pixels.
    pub size: Size,
    pub scale: f64,
    pub pan: Vec2,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0), &EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(size: Size, config: &EditorConfig) -> Self {
        Self {
            size,
            scale: 1.0,
            pan: Vec2::ZERO,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_step: config.zoom_step,
        }
    }

    pub fn to_world(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.pan) / self.scale).to_point()
    }

    pub fn to_screen(&self, world: Point) -> Point {
        (world.to_vec2() * self.scale + self.pan).to_point()
    }

    pub fn screen_dist_to_world(&self, d: f64) -> f64 {
        d / self.scale
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// World point currently under the middle of the canvas.
    pub fn center_world(&self) -> Point {
        self.to_world(Point::new(self.size.width / 2.0, self.size.height / 2.0))
    }

    /// Translate by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Adopt new zoom limits and step, pulling the current scale back into
    /// range about the canvas center. Pan is otherwise untouched.
    pub fn set_limits(&mut self, config: &EditorConfig) {
        self.min_scale = config.min_scale;
        self.max_scale = config.max_scale;
        self.zoom_step = config.zoom_step;
        let anchor = Point::new(self.size.width / 2.0, self.size.height / 2.0);
        self.zoom_to(self.scale, anchor);
    }

    /// Set the scale, keeping the world point under `anchor` fixed on screen.
    /// Returns `true` if the scale changed.
    pub fn zoom_to(&mut self, new_scale: f64, anchor: Point) -> bool {
        let clamped = new_scale.clamp(self.min_scale, self.max_scale);
        if !clamped.is_finite() || clamped == self.scale {
            return false;
        }
        let world = self.to_world(anchor);
        self.scale = clamped;
        self.pan = anchor.to_vec2() - world.to_vec2() * clamped;
        true
    }

    /// One wheel notch: negative `delta_y` zooms in, positive zooms out.
    pub fn zoom_wheel(&mut self, anchor: Point, delta_y: f64) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y < 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        self.zoom_to(self.scale * factor, anchor)
    }

    pub fn zoom_in(&mut self) -> bool {
        let anchor = Point::new(self.size.width / 2.0, self.size.height / 2.0);
        self.zoom_to(self.scale * self.zoom_step, anchor)
    }

    pub fn zoom_out(&mut self) -> bool {
        let anchor = Point::new(self.size.width / 2.0, self.size.height / 2.0);
        self.zoom_to(self.scale / self.zoom_step, anchor)
    }
}
