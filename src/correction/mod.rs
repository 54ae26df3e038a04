//! Collision-resolution search

mod corrector;
mod movable;
mod offset;
mod scene;

pub use corrector::{CollisionCorrector, CorrectionReport, ProbeOutcome, ProbeRecord};
pub use movable::{MovableElement, StaticAnchor};
pub use offset::{OffsetVector, PROBE_SEQUENCE};
pub use scene::{CorrectionScene, GeometricScene};
