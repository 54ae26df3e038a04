//! The model view the correction search probes

use glam::DVec3;

use super::movable::{MovableElement, StaticAnchor};
use crate::core::types::ElementId;
use crate::geometry::{distance_to_segment, GeometryKernel};
use crate::model::{CurveElement, Document, Element};
use crate::traversability::{ElementFilter, SolidIntersectionTester};

/// Queries the correction search needs from the blocked configuration
pub trait CorrectionScene {
    /// Build the displaced group and recount its collisions
    fn movable_element(&self, offset: DVec3) -> MovableElement;

    /// Anchor points of the neighbors that do not move
    fn static_center_points(&self, movable: &MovableElement) -> Vec<StaticAnchor>;

    /// Whether the displaced group is collision-free and still reaches its anchors
    fn is_position_available(&self, movable: &MovableElement, anchors: &[StaticAnchor]) -> bool;
}

/// Scene backed by the model: the curve moves together with its movable
/// neighbors, static neighbors stay put.
pub struct GeometricScene<'s, K: GeometryKernel> {
    curve: &'s CurveElement,
    filter: &'s ElementFilter<'s>,
    tester: &'s SolidIntersectionTester<'s, K>,
    movable_neighbors: Vec<&'s Element>,
    static_neighbors: Vec<&'s Element>,
    /// Model units
    anchor_reach: f64,
}

impl<'s, K: GeometryKernel> GeometricScene<'s, K> {
    /// Resolve the curve's connections in `active` and split them by movability
    pub fn new(
        curve: &'s CurveElement,
        active: &'s Document,
        filter: &'s ElementFilter<'s>,
        tester: &'s SolidIntersectionTester<'s, K>,
        anchor_reach: f64,
    ) -> Self {
        let mut movable_neighbors = Vec::new();
        let mut static_neighbors = Vec::new();
        for id in &curve.connections {
            match active.get(*id) {
                Some(element) if element.is_movable() => movable_neighbors.push(element),
                Some(element) => static_neighbors.push(element),
                None => tracing::warn!("Curve {} is connected to missing element {}", curve.id, id),
            }
        }

        Self {
            curve,
            filter,
            tester,
            movable_neighbors,
            static_neighbors,
            anchor_reach,
        }
    }

    pub fn movable_neighbors(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.movable_neighbors.iter().map(|e| e.id)
    }

    /// Elements never counted as obstacles of the moving group
    fn excluded(&self) -> Vec<ElementId> {
        std::iter::once(self.curve.id)
            .chain(self.curve.connections.iter().copied())
            .collect()
    }
}

impl<K: GeometryKernel> CorrectionScene for GeometricScene<'_, K> {
    fn movable_element(&self, offset: DVec3) -> MovableElement {
        let exclude = self.excluded();

        let mut members = vec![self.curve.id];
        let mut solids = vec![self.curve.swept_solid().translated(offset)];
        for neighbor in &self.movable_neighbors {
            members.push(neighbor.id);
            solids.push(neighbor.solid().translated(offset));
        }

        let mut implicated: Vec<ElementId> = self.movable_neighbors().collect();
        let mut collisions = Vec::with_capacity(solids.len());
        for solid in &solids {
            let found = self.tester.collisions(solid, self.filter, &exclude);
            for collision in found.iter().filter(|c| c.candidate.movable) {
                if !implicated.contains(&collision.candidate.id) {
                    implicated.push(collision.candidate.id);
                }
            }
            collisions.push(found.len());
        }

        MovableElement::new(offset, members, implicated, collisions)
    }

    fn static_center_points(&self, _movable: &MovableElement) -> Vec<StaticAnchor> {
        self.static_neighbors
            .iter()
            .filter_map(|e| {
                Some(StaticAnchor {
                    element: e.id,
                    point: e.solid().center()?,
                })
            })
            .collect()
    }

    fn is_position_available(&self, movable: &MovableElement, anchors: &[StaticAnchor]) -> bool {
        if movable.total_collisions() > 0 {
            return false;
        }
        let start = self.curve.geometry.start + movable.offset;
        let end = self.curve.geometry.end + movable.offset;
        anchors.iter().all(|anchor| {
            let distance = distance_to_segment(anchor.point, start, end);
            if distance > self.anchor_reach {
                tracing::debug!(
                    "Static neighbor {} out of reach ({:.4} > {:.4})",
                    anchor.element,
                    distance,
                    self.anchor_reach
                );
                return false;
            }
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{IntersectionSettings, UnitSettings};
    use crate::core::types::Category;
    use crate::core::units::LengthUnit;
    use crate::geometry::{Aabb, BoxKernel};
    use crate::model::CurveGeometry;

    fn mm() -> UnitSettings {
        UnitSettings {
            display: LengthUnit::Millimeters,
            model: LengthUnit::Millimeters,
        }
    }

    fn curve_element() -> Element {
        Element::curve(
            1,
            Category::Duct,
            CurveGeometry {
                start: DVec3::ZERO,
                end: DVec3::new(1000.0, 0.0, 0.0),
                width: 100.0,
                height: 100.0,
            },
        )
        .with_connections([2, 3])
    }

    fn document() -> Document {
        let fan = Element::boxed(
            2,
            Category::Equipment,
            vec![Aabb::new(
                DVec3::new(-300.0, -100.0, -100.0),
                DVec3::new(0.0, 100.0, 100.0),
            )],
        );
        let branch = Element::curve(
            3,
            Category::Duct,
            CurveGeometry {
                start: DVec3::new(1000.0, 0.0, 0.0),
                end: DVec3::new(1000.0, 800.0, 0.0),
                width: 100.0,
                height: 100.0,
            },
        );
        Document::from_elements("Main", vec![curve_element(), fan, branch]).unwrap()
    }

    #[test]
    fn test_neighbors_split_by_movability() {
        let doc = document();
        let curve = CurveElement::from_element(doc.get(ElementId(1)).unwrap()).unwrap();
        let filter = ElementFilter::ActiveOnly(&doc);
        let settings = IntersectionSettings::architectural();
        let tester = SolidIntersectionTester::new(&BoxKernel, &settings, &mm(), 1.0);
        let scene = GeometricScene::new(&curve, &doc, &filter, &tester, 500.0);

        assert_eq!(scene.movable_neighbors().collect::<Vec<_>>(), vec![ElementId(3)]);

        let movable = scene.movable_element(DVec3::new(0.0, 0.0, 50.0));
        assert_eq!(movable.members, vec![ElementId(1), ElementId(3)]);
        assert!(movable.is_movable_elements_count_valid());
        assert_eq!(movable.total_collisions(), 0);

        let anchors = scene.static_center_points(&movable);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].point, DVec3::new(-150.0, 0.0, 0.0));
        assert!(scene.is_position_available(&movable, &anchors));
    }

    #[test]
    fn test_anchor_out_of_reach() {
        let doc = document();
        let curve = CurveElement::from_element(doc.get(ElementId(1)).unwrap()).unwrap();
        let filter = ElementFilter::ActiveOnly(&doc);
        let settings = IntersectionSettings::architectural();
        let tester = SolidIntersectionTester::new(&BoxKernel, &settings, &mm(), 1.0);
        let scene = GeometricScene::new(&curve, &doc, &filter, &tester, 160.0);

        let movable = scene.movable_element(DVec3::new(0.0, 0.0, 100.0));
        let anchors = scene.static_center_points(&movable);
        assert!(!scene.is_position_available(&movable, &anchors));
    }
}
