//! Directional search for a collision-free position
//!
//! The search walks a fixed probe sequence and accepts the first probe whose
//! displaced position is available. It never compares probes against each
//! other, and it never mutates the model.

use glam::DVec3;
use serde::Serialize;

use super::offset::{OffsetVector, PROBE_SEQUENCE};
use super::scene::CorrectionScene;
use crate::core::types::ElementId;
use crate::geometry::LocalFrame;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Zero or several movable elements would have to move
    RejectedTopology { movable_count: usize },
    /// The position still collides or loses a static connection
    Unavailable { collisions: usize },
    /// Collision-free; these elements move by the probe displacement
    Cleared { members: Vec<ElementId> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeRecord {
    pub direction: OffsetVector,
    pub displacement: DVec3,
    pub outcome: ProbeOutcome,
}

/// Everything one search invocation observed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrectionReport {
    pub probes: Vec<ProbeRecord>,
    /// Total collisions at the first accepted probe that had any
    pub start_collisions_count: Option<usize>,
}

impl CorrectionReport {
    /// The clearing probe, always the last one evaluated
    pub fn accepted(&self) -> Option<&ProbeRecord> {
        self.probes
            .last()
            .filter(|p| matches!(p.outcome, ProbeOutcome::Cleared { .. }))
    }

    /// Displacement and moved elements of the clearing probe
    pub fn accepted_move(&self) -> Option<(DVec3, &[ElementId])> {
        match self.probes.last() {
            Some(ProbeRecord {
                displacement,
                outcome: ProbeOutcome::Cleared { members },
                ..
            }) => Some((*displacement, members.as_slice())),
            _ => None,
        }
    }

    pub fn is_corrected(&self) -> bool {
        self.accepted().is_some()
    }

    pub fn probes_evaluated(&self) -> usize {
        self.probes.len()
    }
}

pub struct CollisionCorrector<'s, S: CorrectionScene> {
    scene: &'s S,
    frame: LocalFrame,
    /// Probe distance in model units
    clearance: f64,
}

impl<'s, S: CorrectionScene> CollisionCorrector<'s, S> {
    pub fn new(scene: &'s S, frame: LocalFrame, clearance: f64) -> Self {
        Self {
            scene,
            frame,
            clearance,
        }
    }

    /// World displacements in probing order
    pub fn displacements(&self) -> [DVec3; 4] {
        PROBE_SEQUENCE.map(|direction| direction.to_world(self.clearance, &self.frame))
    }

    pub fn is_corrected(&self) -> bool {
        self.run().is_corrected()
    }

    pub fn run(&self) -> CorrectionReport {
        let mut report = CorrectionReport::default();

        for direction in PROBE_SEQUENCE {
            let displacement = direction.to_world(self.clearance, &self.frame);
            let movable = self.scene.movable_element(displacement);

            if !movable.is_movable_elements_count_valid() {
                tracing::debug!(
                    "Probe {:?} rejected: {} movable elements implicated",
                    direction,
                    movable.implicated.len()
                );
                report.probes.push(ProbeRecord {
                    direction,
                    displacement,
                    outcome: ProbeOutcome::RejectedTopology {
                        movable_count: movable.implicated.len(),
                    },
                });
                continue;
            }

            let total = movable.total_collisions();
            if report.start_collisions_count.is_none() && total > 0 {
                report.start_collisions_count = Some(total);
            }

            let anchors = self.scene.static_center_points(&movable);
            if self.scene.is_position_available(&movable, &anchors) {
                tracing::debug!("Probe {:?} cleared at {:?}", direction, displacement);
                report.probes.push(ProbeRecord {
                    direction,
                    displacement,
                    outcome: ProbeOutcome::Cleared {
                        members: movable.members,
                    },
                });
                return report;
            }

            report.probes.push(ProbeRecord {
                direction,
                displacement,
                outcome: ProbeOutcome::Unavailable { collisions: total },
            });
        }

        report
    }
}
