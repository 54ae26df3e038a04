//! Length units and the linear scale between them

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Millimeters,
    Centimeters,
    Meters,
    Inches,
    Feet,
}

impl LengthUnit {
    /// Size of one unit in meters
    fn meters(&self) -> f64 {
        match self {
            LengthUnit::Millimeters => 0.001,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Meters => 1.0,
            LengthUnit::Inches => 0.0254,
            LengthUnit::Feet => 0.3048,
        }
    }

    /// Factor that converts a length in `self` into `target`
    pub fn scale_to(&self, target: LengthUnit) -> f64 {
        self.meters() / target.meters()
    }

    pub fn convert(&self, value: f64, target: LengthUnit) -> f64 {
        value * self.scale_to(target)
    }
}
