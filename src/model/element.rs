//! Building elements and the curve view used by the checks

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::{Category, ElementId};
use crate::geometry::{Aabb, LocalFrame, Solid};

/// Centerline plus rectangular cross-section of a linear service element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGeometry {
    pub start: DVec3,
    pub end: DVec3,
    /// Section size across the run (model units)
    pub width: f64,
    /// Section size in the vertical plane of the run (model units)
    pub height: f64,
}

impl CurveGeometry {
    pub fn direction(&self) -> DVec3 {
        self.end - self.start
    }

    pub fn frame(&self) -> LocalFrame {
        LocalFrame::from_direction(self.direction())
    }

    /// Volume swept by the section along the centerline.
    ///
    /// Exact for axis-aligned runs; skewed runs get their bounding box.
    pub fn swept_solid(&self) -> Solid {
        let frame = self.frame();
        let half = frame.lateral.abs() * (self.width * 0.5) + frame.up.abs() * (self.height * 0.5);
        let min = self.start.min(self.end) - half;
        let max = self.start.max(self.end) + half;
        Solid::from_box(Aabb::new(min, max))
    }

    pub fn translated(&self, offset: DVec3) -> CurveGeometry {
        CurveGeometry {
            start: self.start + offset,
            end: self.end + offset,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Boxes { boxes: Vec<Aabb> },
    Curve(CurveGeometry),
}

impl Geometry {
    pub fn translated(&self, offset: DVec3) -> Geometry {
        match self {
            Geometry::Boxes { boxes } => Geometry::Boxes {
                boxes: boxes.iter().map(|b| b.translated(offset)).collect(),
            },
            Geometry::Curve(curve) => Geometry::Curve(curve.translated(offset)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub category: Category,
    #[serde(default)]
    pub name: String,
    pub geometry: Geometry,
    /// Explicit movability; service categories are movable when unset
    #[serde(default)]
    pub movable: Option<bool>,
    /// Elements this one is physically connected to (same document)
    #[serde(default)]
    pub connections: Vec<ElementId>,
}

impl Element {
    pub fn boxed(id: u64, category: Category, boxes: Vec<Aabb>) -> Self {
        Self {
            id: ElementId(id),
            category,
            name: String::new(),
            geometry: Geometry::Boxes { boxes },
            movable: None,
            connections: Vec::new(),
        }
    }

    pub fn curve(id: u64, category: Category, geometry: CurveGeometry) -> Self {
        Self {
            id: ElementId(id),
            category,
            name: String::new(),
            geometry: Geometry::Curve(geometry),
            movable: None,
            connections: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = Some(movable);
        self
    }

    pub fn with_connections(mut self, connections: impl IntoIterator<Item = u64>) -> Self {
        self.connections = connections.into_iter().map(ElementId).collect();
        self
    }

    pub fn is_movable(&self) -> bool {
        self.movable.unwrap_or_else(|| self.category.is_service())
    }

    pub fn solid(&self) -> Solid {
        match &self.geometry {
            Geometry::Boxes { boxes } => Solid::new(boxes.clone()),
            Geometry::Curve(curve) => curve.swept_solid(),
        }
    }

    pub fn translate(&mut self, offset: DVec3) {
        self.geometry = self.geometry.translated(offset);
    }
}

/// A curve element picked for checking, detached from its document
#[derive(Debug, Clone, PartialEq)]
pub struct CurveElement {
    pub id: ElementId,
    pub category: Category,
    pub geometry: CurveGeometry,
    pub connections: Vec<ElementId>,
}

impl CurveElement {
    pub fn from_element(element: &Element) -> Result<Self, ConfigError> {
        match &element.geometry {
            Geometry::Curve(geometry) => Ok(Self {
                id: element.id,
                category: element.category,
                geometry: geometry.clone(),
                connections: element.connections.clone(),
            }),
            Geometry::Boxes { .. } => Err(ConfigError::NotACurve(element.id)),
        }
    }

    pub fn swept_solid(&self) -> Solid {
        self.geometry.swept_solid()
    }

    pub fn frame(&self) -> LocalFrame {
        self.geometry.frame()
    }
}
