//! Probe directions for collision correction

use glam::DVec3;
use serde::Serialize;

use crate::geometry::LocalFrame;

/// Unit step in the element's local frame: right/left and down/up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffsetVector {
    pub lateral: i8,
    pub vertical: i8,
}

impl OffsetVector {
    pub const RIGHT: OffsetVector = OffsetVector { lateral: 1, vertical: 0 };
    pub const DOWN: OffsetVector = OffsetVector { lateral: 0, vertical: -1 };
    pub const LEFT: OffsetVector = OffsetVector { lateral: -1, vertical: 0 };
    pub const UP: OffsetVector = OffsetVector { lateral: 0, vertical: 1 };

    /// Displacement in local (lateral, along, vertical) components
    pub fn local(&self, clearance: f64) -> DVec3 {
        DVec3::new(
            f64::from(self.lateral) * clearance,
            0.0,
            f64::from(self.vertical) * clearance,
        )
    }

    pub fn to_world(&self, clearance: f64, frame: &LocalFrame) -> DVec3 {
        frame.to_world(self.local(clearance))
    }
}

/// Probing order: right, down, left, up
pub const PROBE_SEQUENCE: [OffsetVector; 4] = [
    OffsetVector::RIGHT,
    OffsetVector::DOWN,
    OffsetVector::LEFT,
    OffsetVector::UP,
];
