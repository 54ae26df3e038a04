//! Candidate filter over the active document and its links

use serde::Serialize;

use crate::core::config::ContextSettings;
use crate::core::error::ConfigError;
use crate::core::types::{Category, ElementId, SourceRef};
use crate::geometry::{Aabb, Solid};
use crate::model::{Document, DocumentContext, Element, LinkedModel};

/// An element that may obstruct the curve, in host coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateElement {
    pub id: ElementId,
    pub category: Category,
    pub source: SourceRef,
    /// Only active-document elements can be moved
    pub movable: bool,
    #[serde(skip)]
    pub solid: Solid,
}

/// Which documents a check draws candidates from, fixed at construction
#[derive(Debug, Clone)]
pub enum ElementFilter<'a> {
    ActiveOnly(&'a Document),
    LinksOnly(Vec<&'a LinkedModel>),
    Both {
        active: &'a Document,
        links: Vec<&'a LinkedModel>,
    },
}

impl<'a> ElementFilter<'a> {
    /// Pick the scope from the sources present.
    ///
    /// Both sources present always selects `Both`, even with an empty link list.
    /// Links alone must resolve to at least one loaded link.
    pub fn new(
        active: Option<&'a Document>,
        links: Option<Vec<&'a LinkedModel>>,
    ) -> Result<Self, ConfigError> {
        match (active, links) {
            (Some(active), Some(links)) => Ok(ElementFilter::Both { active, links }),
            (None, Some(links)) if links.is_empty() => Err(ConfigError::NoDocumentSource),
            (None, Some(links)) => Ok(ElementFilter::LinksOnly(links)),
            (Some(active), None) => Ok(ElementFilter::ActiveOnly(active)),
            (None, None) => Err(ConfigError::NoDocumentSource),
        }
    }

    /// Scope described by one context's settings
    pub fn for_context(
        context: &'a DocumentContext,
        settings: &ContextSettings,
    ) -> Result<Self, ConfigError> {
        let active = settings.check_active.then(|| context.active());
        let links = settings
            .check_links
            .then(|| context.select_links(&settings.link_titles));
        Self::new(active, links)
    }

    pub fn active(&self) -> Option<&'a Document> {
        match self {
            ElementFilter::ActiveOnly(active) | ElementFilter::Both { active, .. } => Some(*active),
            ElementFilter::LinksOnly(_) => None,
        }
    }

    pub fn links(&self) -> &[&'a LinkedModel] {
        match self {
            ElementFilter::LinksOnly(links) | ElementFilter::Both { links, .. } => links,
            ElementFilter::ActiveOnly(_) => &[],
        }
    }

    /// Elements of the tested categories whose bounds touch `region`.
    ///
    /// `exclude` names active-document elements to skip, such as the curve itself.
    pub fn candidates(
        &self,
        region: &Aabb,
        categories: &[Category],
        exclude: &[ElementId],
    ) -> Vec<CandidateElement> {
        let mut found = Vec::new();

        if let Some(active) = self.active() {
            found.extend(
                active
                    .iter()
                    .filter(|e| categories.contains(&e.category) && !exclude.contains(&e.id))
                    .filter_map(|e| Self::in_region(e, e.solid(), region, SourceRef::Active, true)),
            );
        }

        for link in self.links() {
            found.extend(
                link.document
                    .iter()
                    .filter(|e| categories.contains(&e.category))
                    .filter_map(|e| {
                        let solid = e.solid().translated(link.offset);
                        let source = SourceRef::Link(link.title().to_string());
                        Self::in_region(e, solid, region, source, false)
                    }),
            );
        }

        found
    }

    fn in_region(
        element: &Element,
        solid: Solid,
        region: &Aabb,
        source: SourceRef,
        editable: bool,
    ) -> Option<CandidateElement> {
        let bounds = solid.bounds()?;
        if !bounds.intersects(region) {
            return None;
        }
        Some(CandidateElement {
            id: element.id,
            category: element.category,
            source,
            movable: editable && element.is_movable(),
            solid,
        })
    }
}
