//! Hypothetical displaced group evaluated by one probe

use glam::DVec3;
use serde::Serialize;

use crate::core::types::ElementId;

/// The curve and the elements moving with it, at one probe displacement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovableElement {
    /// World displacement applied to every member
    pub offset: DVec3,
    /// Elements that move together; the curve comes first
    pub members: Vec<ElementId>,
    /// Movable elements that would have to move for this placement
    pub implicated: Vec<ElementId>,
    /// Collision count per member at the displaced position
    collisions: Vec<usize>,
}

impl MovableElement {
    pub fn new(
        offset: DVec3,
        members: Vec<ElementId>,
        implicated: Vec<ElementId>,
        collisions: Vec<usize>,
    ) -> Self {
        Self {
            offset,
            members,
            implicated,
            collisions,
        }
    }

    pub fn collisions(&self) -> &[usize] {
        &self.collisions
    }

    pub fn total_collisions(&self) -> usize {
        self.collisions.iter().sum()
    }

    /// Only a single movable element may be relocated at a time
    pub fn is_movable_elements_count_valid(&self) -> bool {
        self.implicated.len() == 1
    }
}

/// Reference point on a neighbor that stays where it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StaticAnchor {
    pub element: ElementId,
    pub point: DVec3,
}
