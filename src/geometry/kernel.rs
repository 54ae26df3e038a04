//! Solid intersection capability supplied by the geometry kernel

use serde::Serialize;

use super::solid::Solid;

/// Measure of how much two solids share
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlap {
    /// Shared volume in cubic model units
    pub volume: f64,
    /// Penetration depth in model units; zero for touching solids
    pub depth: f64,
}

impl Overlap {
    /// Whether the overlap counts as a collision under `tolerance` (model units)
    ///
    /// A zero tolerance counts any contact, including touching faces.
    pub fn exceeds(&self, tolerance: f64) -> bool {
        if tolerance <= 0.0 {
            return true;
        }
        self.depth > tolerance
    }
}

/// Geometry kernel interface. Queries never mutate the solids.
pub trait GeometryKernel {
    /// Returns `None` when the solids are apart, the overlap measure otherwise
    fn intersect(&self, a: &Solid, b: &Solid) -> Option<Overlap>;
}

/// Kernel over unions of axis-aligned boxes
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxKernel;

impl GeometryKernel for BoxKernel {
    fn intersect(&self, a: &Solid, b: &Solid) -> Option<Overlap> {
        let mut result: Option<Overlap> = None;

        for box_a in &a.boxes {
            for box_b in &b.boxes {
                let Some(common) = box_a.intersection(box_b) else {
                    continue;
                };
                let size = common.size();
                let depth = size.x.min(size.y).min(size.z);
                let overlap = result.get_or_insert(Overlap {
                    volume: 0.0,
                    depth: 0.0,
                });
                overlap.volume += common.volume();
                overlap.depth = overlap.depth.max(depth);
            }
        }

        result
    }
}
