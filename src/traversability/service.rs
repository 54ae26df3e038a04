//! Traversability check for one curve in one document context

use glam::DVec3;
use serde::Serialize;

use super::filter::ElementFilter;
use super::intersection::{Collision, SolidIntersectionTester};
use crate::core::config::{CheckConfig, IntersectionSettings};
use crate::core::error::Result;
use crate::core::types::{ContextKind, ElementId};
use crate::correction::{CollisionCorrector, CorrectionReport, GeometricScene};
use crate::geometry::GeometryKernel;
use crate::host::{Messenger, TracingMessenger, TransactionFactory};
use crate::model::{CurveElement, DocumentContext};

static DEFAULT_MESSENGER: TracingMessenger = TracingMessenger;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerdictStatus {
    /// No collisions found
    Passed,
    /// Collisions cleared by moving the listed elements
    Corrected {
        displacement: DVec3,
        moved: Vec<ElementId>,
    },
    /// Collisions remain and no probe could clear them
    Blocked,
}

/// Outcome for one (curve, context) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversabilityVerdict {
    pub context: ContextKind,
    pub curve: ElementId,
    pub status: VerdictStatus,
    /// Collisions found at the curve's original position
    pub collisions: Vec<Collision>,
    /// Present only when the correction search ran
    pub search: Option<CorrectionReport>,
}

impl TraversabilityVerdict {
    pub fn is_passed(&self) -> bool {
        !matches!(self.status, VerdictStatus::Blocked)
    }
}

pub struct TraversabilityService<'a, K: GeometryKernel> {
    kind: ContextKind,
    context: &'a DocumentContext,
    filter: ElementFilter<'a>,
    tester: SolidIntersectionTester<'a, K>,
    /// Model units
    clearance: f64,
    /// Model units
    anchor_reach: f64,
    transactions: &'a dyn TransactionFactory,
    messenger: &'a dyn Messenger,
}

/// Collects the collaborators of a `TraversabilityService`
pub struct TraversabilityServiceBuilder<'a, K: GeometryKernel> {
    kind: ContextKind,
    context: &'a DocumentContext,
    kernel: &'a K,
    config: &'a CheckConfig,
    transactions: &'a dyn TransactionFactory,
    messenger: &'a dyn Messenger,
    filter: Option<ElementFilter<'a>>,
    settings: Option<&'a IntersectionSettings>,
}

impl<'a, K: GeometryKernel> TraversabilityServiceBuilder<'a, K> {
    pub fn messenger(mut self, messenger: &'a dyn Messenger) -> Self {
        self.messenger = messenger;
        self
    }

    /// Replace the filter derived from the context settings
    pub fn filter(mut self, filter: ElementFilter<'a>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Replace the context's intersection settings
    pub fn settings(mut self, settings: &'a IntersectionSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(self) -> Result<TraversabilityService<'a, K>> {
        let context_settings = self.config.context(self.kind);
        let filter = match self.filter {
            Some(filter) => filter,
            None => ElementFilter::for_context(self.context, context_settings)?,
        };
        let settings = self
            .settings
            .unwrap_or(&context_settings.wall_intersection);
        let tester = SolidIntersectionTester::new(
            self.kernel,
            settings,
            &self.config.units,
            self.config.search_margin_model(),
        );

        Ok(TraversabilityService {
            kind: self.kind,
            context: self.context,
            filter,
            tester,
            clearance: self.config.clearance_model(),
            anchor_reach: self.config.anchor_reach_model(),
            transactions: self.transactions,
            messenger: self.messenger,
        })
    }
}

impl<'a, K: GeometryKernel> TraversabilityService<'a, K> {
    pub fn builder(
        kind: ContextKind,
        context: &'a DocumentContext,
        kernel: &'a K,
        config: &'a CheckConfig,
        transactions: &'a dyn TransactionFactory,
    ) -> TraversabilityServiceBuilder<'a, K> {
        TraversabilityServiceBuilder {
            kind,
            context,
            kernel,
            config,
            transactions,
            messenger: &DEFAULT_MESSENGER,
            filter: None,
            settings: None,
        }
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn filter(&self) -> &ElementFilter<'a> {
        &self.filter
    }

    /// True when the curve passes or was corrected
    pub fn initiate(&self, curve: &CurveElement) -> bool {
        match self.check(curve) {
            Ok(verdict) => verdict.is_passed(),
            Err(e) => {
                tracing::error!("{} check of {} failed: {}", self.kind, curve.id, e);
                self.messenger
                    .show_failure(&format!("{} check failed", self.kind), &e.to_string());
                false
            }
        }
    }

    pub fn check(&self, curve: &CurveElement) -> Result<TraversabilityVerdict> {
        let exclude: Vec<ElementId> = std::iter::once(curve.id)
            .chain(curve.connections.iter().copied())
            .collect();
        let collisions = self
            .tester
            .collisions(&curve.swept_solid(), &self.filter, &exclude);

        if collisions.is_empty() {
            tracing::info!("{}: curve {} is traversable", self.kind, curve.id);
            return Ok(TraversabilityVerdict {
                context: self.kind,
                curve: curve.id,
                status: VerdictStatus::Passed,
                collisions,
                search: None,
            });
        }

        tracing::info!(
            "{}: curve {} collides with {} elements, searching for a free position",
            self.kind,
            curve.id,
            collisions.len()
        );

        let scene = GeometricScene::new(
            curve,
            self.context.active(),
            &self.filter,
            &self.tester,
            self.anchor_reach,
        );
        let report = CollisionCorrector::new(&scene, curve.frame(), self.clearance).run();

        let status = match report.accepted_move() {
            Some((displacement, members)) => {
                self.commit_move(curve.id, members, displacement)?;
                VerdictStatus::Corrected {
                    displacement,
                    moved: members.to_vec(),
                }
            }
            None => {
                let offending: Vec<String> = collisions
                    .iter()
                    .map(|c| {
                        format!(
                            "{} {} ({})",
                            c.candidate.category, c.candidate.id, c.candidate.source
                        )
                    })
                    .collect();
                self.messenger.show_failure(
                    &format!("{} traversability", self.kind),
                    &format!(
                        "Curve {} is blocked by {}",
                        curve.id,
                        offending.join(", ")
                    ),
                );
                VerdictStatus::Blocked
            }
        };

        Ok(TraversabilityVerdict {
            context: self.kind,
            curve: curve.id,
            status,
            collisions,
            search: Some(report),
        })
    }

    fn commit_move(&self, curve: ElementId, members: &[ElementId], offset: DVec3) -> Result<()> {
        let mut tx = self
            .transactions
            .begin(&format!("{} correction of {}", self.kind, curve))?;
        for member in members {
            tx.move_element(*member, offset)?;
        }
        tx.commit()?;
        tracing::info!(
            "{}: moved {} elements by {:?} to clear curve {}",
            self.kind,
            members.len(),
            offset,
            curve
        );
        Ok(())
    }
}
