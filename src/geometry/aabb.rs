//! Axis-aligned boxes in model coordinates

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Closed axis-aligned box. Boxes sharing only a face still intersect,
/// with a zero-extent intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AabbCorners")]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

/// Corners as written in scene files, possibly swapped
#[derive(Deserialize)]
struct AabbCorners {
    min: DVec3,
    max: DVec3,
}

impl From<AabbCorners> for Aabb {
    fn from(corners: AabbCorners) -> Self {
        Aabb::new(corners.min, corners.max)
    }
}

impl Aabb {
    /// Box spanning two corners in any order
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: DVec3, half_extents: DVec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Closed-interval test on all three axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Common region of two boxes; zero-extent when they only touch
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        if !self.intersects(other) {
            return None;
        }
        Some(Aabb {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expanded(&self, margin: f64) -> Aabb {
        let m = DVec3::splat(margin);
        Aabb {
            min: self.min - m,
            max: self.max + m,
        }
    }

    pub fn translated(&self, offset: DVec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
