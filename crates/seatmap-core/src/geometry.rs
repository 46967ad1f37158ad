//! Pure geometry helpers: bounding boxes, intersection, angles.
//!
//! Everything here works in world space. Element rotation is about the
//! element's top-left origin, so a rotated element's world bounds are the
//! axis-aligned box around its four rotated corners.

use kurbo::{Affine, Point, Rect, Vec2};

/// Full turn in degrees.
pub const FULL_TURN: f64 = 360.0;

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Non-finite input maps to `0.0`.
pub fn normalize_angle(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= FULL_TURN { 0.0 } else { r }
}

/// Shortest distance between two angles on the circle, in `[0, 180]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (normalize_angle(a) - normalize_angle(b)).abs();
    d.min(FULL_TURN - d)
}

/// Rotation about `origin` by `deg` degrees (clockwise on a y-down canvas).
pub fn rotation_about(origin: Point, deg: f64) -> Affine {
    Affine::rotate_about(deg.to_radians(), origin)
}

/// The four corners of a `width × height` box at `origin`, rotated about `origin`.
/// Order: top-left, top-right, bottom-right, bottom-left (pre-rotation names).
pub fn rotated_corners(origin: Point, width: f64, height: f64, rotation: f64) -> [Point; 4] {
    let t = rotation_about(origin, rotation);
    [
        t * origin,
        t * (origin + Vec2::new(width, 0.0)),
        t * (origin + Vec2::new(width, height)),
        t * (origin + Vec2::new(0.0, height)),
    ]
}

/// Axis-aligned world bounds of a (possibly rotated) box.
pub fn rotated_bounds(origin: Point, width: f64, height: f64, rotation: f64) -> Rect {
    if normalize_angle(rotation) == 0.0 {
        return Rect::from_origin_size(origin, (width, height));
    }
    let corners = rotated_corners(origin, width, height, rotation);
    let mut r = Rect::from_points(corners[0], corners[1]);
    r = r.union_pt(corners[2]);
    r.union_pt(corners[3])
}

/// Visual center of a (possibly rotated) box.
pub fn rotated_center(origin: Point, width: f64, height: f64, rotation: f64) -> Point {
    rotation_about(origin, rotation) * (origin + Vec2::new(width / 2.0, height / 2.0))
}

/// Map a world point into the box's unrotated local frame (origin at top-left).
pub fn to_local(point: Point, origin: Point, rotation: f64) -> Point {
    let local = rotation_about(origin, -rotation) * point;
    Point::new(local.x - origin.x, local.y - origin.y)
}

/// Inclusive AABB overlap: touching edges count as intersecting.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

/// Normalized rectangle spanned by two corner points.
pub fn rect_between(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// The three vertical reference lines of a box: left, center, right.
pub fn vertical_stops(r: Rect) -> [f64; 3] {
    [r.x0, (r.x0 + r.x1) / 2.0, r.x1]
}

/// The three horizontal reference lines of a box: top, center, bottom.
pub fn horizontal_stops(r: Rect) -> [f64; 3] {
    [r.y0, (r.y0 + r.y1) / 2.0, r.y1]
}
