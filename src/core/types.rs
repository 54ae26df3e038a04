//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Element identifier, unique within one document
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "#{}", _0)]
#[serde(transparent)]
pub struct ElementId(pub u64);

/// Building element categories the checks distinguish
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Wall,
    Floor,
    Ceiling,
    Roof,
    Column,
    Beam,
    Foundation,
    Duct,
    Pipe,
    CableTray,
    Fitting,
    Equipment,
    Generic,
}

impl Category {
    /// Service categories an automatic correction is allowed to move
    pub fn is_service(&self) -> bool {
        matches!(
            self,
            Category::Duct | Category::Pipe | Category::CableTray | Category::Fitting
        )
    }
}

/// Which document an element was found in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "title", rename_all = "snake_case")]
pub enum SourceRef {
    Active,
    Link(String),
}

impl std::fmt::Display for SourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceRef::Active => write!(f, "active"),
            SourceRef::Link(title) => write!(f, "link '{}'", title),
        }
    }
}

/// The two evaluation profiles applied to the same physical model
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContextKind {
    #[display(fmt = "AR")]
    Ar,
    #[display(fmt = "KR")]
    Kr,
}

impl ContextKind {
    /// Evaluation order used by the check workflow
    pub const ORDER: [ContextKind; 2] = [ContextKind::Ar, ContextKind::Kr];
}
