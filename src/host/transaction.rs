//! Scoped write transactions for model mutations

use glam::DVec3;
use serde::Serialize;
use std::cell::RefCell;

use crate::core::error::Result;
use crate::core::types::ElementId;
use crate::model::DocumentContext;

/// Displacement of one active-document element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Relocation {
    pub element: ElementId,
    pub offset: DVec3,
}

/// A write scope. Dropping it without `commit` rolls back every staged change.
pub trait Transaction {
    fn move_element(&mut self, element: ElementId, offset: DVec3) -> Result<()>;

    fn commit(self: Box<Self>) -> Result<()>;
}

pub trait TransactionFactory {
    fn begin(&self, name: &str) -> Result<Box<dyn Transaction + '_>>;

    /// Bring `context` up to date with everything committed so far.
    ///
    /// Returns the number of relocations applied. Hosts whose transactions
    /// write straight into the model return 0.
    fn apply_committed(&self, context: &mut DocumentContext) -> Result<usize>;
}

/// Factory that journals committed relocations for later application
#[derive(Debug, Default)]
pub struct JournalTransactions {
    committed: RefCell<Vec<Relocation>>,
}

impl JournalTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relocations committed so far, oldest first
    pub fn committed(&self) -> Vec<Relocation> {
        self.committed.borrow().clone()
    }

    /// Drain the journal into the active document of `context`
    pub fn apply_to(&self, context: &mut DocumentContext) -> Result<usize> {
        let relocations: Vec<Relocation> = self.committed.borrow_mut().drain(..).collect();
        for relocation in &relocations {
            context
                .active_mut()
                .translate_element(relocation.element, relocation.offset)?;
        }
        Ok(relocations.len())
    }
}

impl TransactionFactory for JournalTransactions {
    fn begin(&self, name: &str) -> Result<Box<dyn Transaction + '_>> {
        Ok(Box::new(JournalTransaction {
            name: name.to_string(),
            staged: Vec::new(),
            journal: &self.committed,
            done: false,
        }))
    }

    fn apply_committed(&self, context: &mut DocumentContext) -> Result<usize> {
        self.apply_to(context)
    }
}

struct JournalTransaction<'a> {
    name: String,
    staged: Vec<Relocation>,
    journal: &'a RefCell<Vec<Relocation>>,
    done: bool,
}

impl Transaction for JournalTransaction<'_> {
    fn move_element(&mut self, element: ElementId, offset: DVec3) -> Result<()> {
        self.staged.push(Relocation { element, offset });
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> Result<()> {
        let staged = std::mem::take(&mut self.staged);
        tracing::debug!("Committing '{}' with {} relocations", self.name, staged.len());
        self.journal.borrow_mut().extend(staged);
        self.done = true;
        Ok(())
    }
}

impl Drop for JournalTransaction<'_> {
    fn drop(&mut self) {
        if !self.done && !self.staged.is_empty() {
            tracing::debug!(
                "Rolled back '{}' ({} staged relocations)",
                self.name,
                self.staged.len()
            );
        }
    }
}
