//! Solids as unions of axis-aligned boxes

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solid {
    pub boxes: Vec<Aabb>,
}

impl Solid {
    pub fn new(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    pub fn from_box(aabb: Aabb) -> Self {
        Self { boxes: vec![aabb] }
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Bounding box of the whole solid
    pub fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.boxes.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }

    pub fn center(&self) -> Option<DVec3> {
        self.bounds().map(|b| b.center())
    }

    pub fn translated(&self, offset: DVec3) -> Solid {
        Solid {
            boxes: self.boxes.iter().map(|b| b.translated(offset)).collect(),
        }
    }
}
