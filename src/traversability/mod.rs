//! Candidate filtering, intersection testing and the traversability service

mod filter;
mod intersection;
mod service;
mod workflow;

pub use filter::{CandidateElement, ElementFilter};
pub use intersection::{Collision, SolidIntersectionTester};
pub use service::{
    TraversabilityService, TraversabilityServiceBuilder, TraversabilityVerdict, VerdictStatus,
};
pub use workflow::{run_checks, WorkflowOutcome};
