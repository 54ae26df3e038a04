//! Tolerance-classified solid intersection against filtered candidates

use serde::Serialize;

use super::filter::{CandidateElement, ElementFilter};
use crate::core::config::{IntersectionSettings, UnitSettings};
use crate::core::types::{Category, ElementId};
use crate::geometry::{GeometryKernel, Overlap, Solid};

/// A candidate whose overlap exceeds the tolerance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collision {
    pub candidate: CandidateElement,
    pub overlap: Overlap,
}

/// Runs kernel intersection queries under one settings bundle. Read-only.
pub struct SolidIntersectionTester<'k, K: GeometryKernel> {
    kernel: &'k K,
    categories: Vec<Category>,
    /// Minimum penetration depth in model units
    tolerance: f64,
    /// Region padding in model units
    margin: f64,
}

impl<'k, K: GeometryKernel> SolidIntersectionTester<'k, K> {
    pub fn new(
        kernel: &'k K,
        settings: &IntersectionSettings,
        units: &UnitSettings,
        margin: f64,
    ) -> Self {
        Self {
            kernel,
            categories: settings.categories.clone(),
            tolerance: settings.tolerance(units),
            margin,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Overlap of two solids if it counts as a collision
    pub fn test(&self, a: &Solid, b: &Solid) -> Option<Overlap> {
        self.kernel
            .intersect(a, b)
            .filter(|overlap| overlap.exceeds(self.tolerance))
    }

    /// Candidates around `solid` that collide with it, in filter order
    pub fn collisions(
        &self,
        solid: &Solid,
        filter: &ElementFilter<'_>,
        exclude: &[ElementId],
    ) -> Vec<Collision> {
        let Some(bounds) = solid.bounds() else {
            return Vec::new();
        };
        let region = bounds.expanded(self.margin);

        filter
            .candidates(&region, &self.categories, exclude)
            .into_iter()
            .filter_map(|candidate| {
                let overlap = self.test(solid, &candidate.solid)?;
                tracing::debug!(
                    "Collision with {} {} in {} (depth {:.4}, volume {:.4})",
                    candidate.category,
                    candidate.id,
                    candidate.source,
                    overlap.depth,
                    overlap.volume
                );
                Some(Collision { candidate, overlap })
            })
            .collect()
    }
}
