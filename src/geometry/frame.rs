//! Local frame of a linear element

use glam::DVec3;

/// Below this horizontal length a direction is treated as vertical
const VERTICAL_EPSILON: f64 = 1e-9;

/// Orthonormal frame attached to a centerline.
///
/// `lateral` points to the right of the run in plan, `up` completes the
/// frame and equals world Z for horizontal runs. Vertical runs use world X as
/// lateral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub axis: DVec3,
    pub lateral: DVec3,
    pub up: DVec3,
}

impl LocalFrame {
    pub fn from_direction(direction: DVec3) -> Self {
        let axis = direction.normalize_or_zero();
        let right = axis.cross(DVec3::Z);
        let lateral = if right.length() > VERTICAL_EPSILON {
            right.normalize()
        } else {
            DVec3::X
        };
        let up = lateral.cross(axis).normalize_or_zero();
        let up = if up == DVec3::ZERO { DVec3::Z } else { up };
        Self { axis, lateral, up }
    }

    /// Map (lateral, along, vertical) components into world space
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.lateral * local.x + self.axis * local.y + self.up * local.z
    }
}

/// Shortest distance from `point` to the segment `a`-`b`
pub fn distance_to_segment(point: DVec3, a: DVec3, b: DVec3) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
