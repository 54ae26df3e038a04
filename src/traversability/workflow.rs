//! AR then KR check of one curve, failing fast

use serde::Serialize;

use super::service::{TraversabilityService, TraversabilityVerdict};
use crate::core::config::CheckConfig;
use crate::core::error::Result;
use crate::core::types::{ContextKind, ElementId};
use crate::geometry::GeometryKernel;
use crate::host::{Messenger, TransactionFactory};
use crate::model::DocumentContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowOutcome {
    /// Verdicts in evaluation order; stops at the first failure
    pub verdicts: Vec<TraversabilityVerdict>,
}

impl WorkflowOutcome {
    pub fn is_success(&self) -> bool {
        self.verdicts.len() == ContextKind::ORDER.len() && self.verdicts.iter().all(|v| v.is_passed())
    }

    pub fn failed_context(&self) -> Option<ContextKind> {
        self.verdicts
            .iter()
            .find(|v| !v.is_passed())
            .map(|v| v.context)
    }
}

/// Check `curve` in each context exactly once.
///
/// Corrections committed by one context are applied to the model before the
/// next context is checked, so KR sees the geometry AR left behind.
pub fn run_checks<K: GeometryKernel>(
    context: &mut DocumentContext,
    curve: ElementId,
    kernel: &K,
    config: &CheckConfig,
    transactions: &dyn TransactionFactory,
    messenger: &dyn Messenger,
) -> Result<WorkflowOutcome> {
    let mut verdicts = Vec::with_capacity(ContextKind::ORDER.len());

    for kind in ContextKind::ORDER {
        let verdict = {
            let curve = context.curve(curve)?;
            let service = TraversabilityService::builder(kind, context, kernel, config, transactions)
                .messenger(messenger)
                .build()?;
            service.check(&curve)?
        };

        let applied = transactions.apply_committed(context)?;
        if applied > 0 {
            tracing::debug!("{}: applied {} relocations to the model", kind, applied);
        }

        let passed = verdict.is_passed();
        verdicts.push(verdict);
        if !passed {
            tracing::warn!("{} check failed for curve {}, aborting", kind, curve);
            break;
        }
    }

    Ok(WorkflowOutcome { verdicts })
}
