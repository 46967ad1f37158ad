//! Layout data model.
//!
//! A layout is a flat, ordered list of [`LayoutElement`]s in world space.
//! Geometry is stored pre-rotation: `(x, y)` is the top-left corner and the
//! element rotates about that corner. Later elements paint on top.

use crate::geometry::{normalize_angle, rotated_bounds, rotated_center, to_local};
use crate::id::ElementId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

// ─── Kinds ───────────────────────────────────────────────────────────────

/// Outline of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableShape {
    #[default]
    Rectangle,
    Circle,
}

/// Non-seating floor areas the host application knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneKind {
    Stage,
    DanceFloor,
    Bar,
    Buffet,
    Entrance,
}

/// What an element is. Table-only fields live on the `Table` variant so
/// they cannot be read off a decoration by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Table {
        #[serde(default)]
        shape: TableShape,
        #[serde(default, rename = "seatCount")]
        seat_count: Option<u32>,
    },
    Decor,
    Zone {
        zone: ZoneKind,
    },
}

impl ElementKind {
    /// Short prefix used when generating ids for this kind.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Table { .. } => "table",
            Self::Decor => "decor",
            Self::Zone { .. } => "zone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CornerStyle {
    #[default]
    Straight,
    Rounded,
}

fn default_opacity() -> f64 {
    1.0
}

// ─── Element ─────────────────────────────────────────────────────────────

/// A placed object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutElement {
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, always in `[0, 360)` once sanitized.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub corner_style: CornerStyle,
}

impl LayoutElement {
    pub fn new(id: ElementId, kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            label: None,
            opacity: 1.0,
            color: None,
            corner_style: CornerStyle::Straight,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_circle(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Table {
                shape: TableShape::Circle,
                ..
            }
        )
    }

    /// World-space axis-aligned bounds, accounting for rotation.
    pub fn bounds(&self) -> Rect {
        rotated_bounds(self.origin(), self.width, self.height, self.rotation)
    }

    /// Bounds as if the element's top-left were at `origin`.
    pub fn bounds_at(&self, origin: Point) -> Rect {
        rotated_bounds(origin, self.width, self.height, self.rotation)
    }

    pub fn center(&self) -> Point {
        rotated_center(self.origin(), self.width, self.height, self.rotation)
    }

    /// Exact shape test: rotated rectangle, or disc for circular tables.
    pub fn contains(&self, point: Point) -> bool {
        let local = to_local(point, self.origin(), self.rotation);
        if self.is_circle() {
            let r = self.width / 2.0;
            let dx = local.x - r;
            let dy = local.y - r;
            return dx * dx + dy * dy <= r * r;
        }
        local.x >= 0.0 && local.x <= self.width && local.y >= 0.0 && local.y <= self.height
    }

    /// Re-establish the model invariants. Returns `true` if anything changed.
    ///
    /// - non-finite position → 0
    /// - width/height below `min_size` (or non-finite) → `min_size`
    /// - rotation normalized into `[0, 360)`
    /// - opacity clamped into `[0, 1]`
    /// - circular tables made square using the larger side
    pub fn sanitize(&mut self, min_size: f64) -> bool {
        let before = self.clone();
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
        self.width = clamp_size(self.width, min_size);
        self.height = clamp_size(self.height, min_size);
        if self.is_circle() && self.width != self.height {
            let side = self.width.max(self.height);
            self.width = side;
            self.height = side;
        }
        self.rotation = normalize_angle(self.rotation);
        self.opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        *self != before
    }

    /// Apply a partial update. Does not sanitize; the store does that.
    pub fn apply(&mut self, patch: &ElementPatch) {
        if let Some(kind) = &patch.kind {
            self.kind = kind.clone();
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(o) = patch.opacity {
            self.opacity = o;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(cs) = patch.corner_style {
            self.corner_style = cs;
        }
    }

    /// Everything except identity and position.
    pub fn template(&self) -> ElementTemplate {
        ElementTemplate {
            kind: self.kind.clone(),
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            label: self.label.clone(),
            opacity: self.opacity,
            color: self.color.clone(),
            corner_style: self.corner_style,
        }
    }
}

fn clamp_size(v: f64, min_size: f64) -> f64 {
    if v.is_finite() && v >= min_size {
        v
    } else {
        min_size
    }
}

// ─── Template ────────────────────────────────────────────────────────────

/// An element's attribute set without id or position.
///
/// Palette entries and clipboard contents are both templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTemplate {
    #[serde(flatten)]
    pub kind: ElementKind,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub corner_style: CornerStyle,
}

impl ElementTemplate {
    pub fn new(kind: ElementKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            rotation: 0.0,
            label: None,
            opacity: 1.0,
            color: None,
            corner_style: CornerStyle::Straight,
        }
    }

    /// Place the template at `origin` (top-left) under a new identity.
    pub fn instantiate(&self, id: ElementId, origin: Point) -> LayoutElement {
        LayoutElement {
            id,
            kind: self.kind.clone(),
            x: origin.x,
            y: origin.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            label: self.label.clone(),
            opacity: self.opacity,
            color: self.color.clone(),
            corner_style: self.corner_style,
        }
    }
}

// ─── Patch ───────────────────────────────────────────────────────────────

/// Partial attribute update. `None` leaves the field untouched; for the
/// nullable fields `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub kind: Option<ElementKind>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub label: Option<Option<String>>,
    pub opacity: Option<f64>,
    pub color: Option<Option<String>>,
    pub corner_style: Option<CornerStyle>,
}

impl ElementPatch {
    pub fn position(p: Point) -> Self {
        Self {
            x: Some(p.x),
            y: Some(p.y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
