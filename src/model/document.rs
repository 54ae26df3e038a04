//! In-memory documents, links and the context tying them together

use ahash::{AHashMap, AHashSet};
use glam::DVec3;

use super::element::{CurveElement, Element};
use crate::core::error::ConfigError;
use crate::core::types::ElementId;

/// One model: a titled set of elements kept in insertion order
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    elements: Vec<Element>,
    /// Map from element id to position in `elements`
    index: AHashMap<ElementId, usize>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Build a document, rejecting repeated element ids
    pub fn from_elements(
        title: impl Into<String>,
        elements: impl IntoIterator<Item = Element>,
    ) -> Result<Self, ConfigError> {
        let mut document = Self::new(title);
        for element in elements {
            document.insert(element)?;
        }
        Ok(document)
    }

    pub fn insert(&mut self, element: Element) -> Result<(), ConfigError> {
        if self.index.contains_key(&element.id) {
            return Err(ConfigError::DuplicateElementId {
                document: self.title.clone(),
                id: element.id,
            });
        }
        self.index.insert(element.id, self.elements.len());
        self.elements.push(element);
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.index.get(&id).map(|&i| &self.elements[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Move an element by `offset`
    pub fn translate_element(&mut self, id: ElementId, offset: DVec3) -> Result<(), ConfigError> {
        let idx = *self.index.get(&id).ok_or(ConfigError::ElementNotFound(id))?;
        self.elements[idx].translate(offset);
        Ok(())
    }
}

/// A linked sub-model placed into the host with a translation
#[derive(Debug, Clone)]
pub struct LinkedModel {
    pub document: Document,
    pub offset: DVec3,
}

impl LinkedModel {
    pub fn new(document: Document, offset: DVec3) -> Self {
        Self { document, offset }
    }

    pub fn title(&self) -> &str {
        self.document.title()
    }
}

/// Active model plus its loaded links
#[derive(Debug, Clone)]
pub struct DocumentContext {
    active: Document,
    links: Vec<LinkedModel>,
}

impl DocumentContext {
    /// Validates that link titles are unique and distinct from the active title
    pub fn new(active: Document, links: Vec<LinkedModel>) -> Result<Self, ConfigError> {
        let mut seen = AHashSet::new();
        for link in &links {
            if link.title() == active.title() {
                return Err(ConfigError::ActiveDocumentLinked(link.title().to_string()));
            }
            if !seen.insert(link.title()) {
                return Err(ConfigError::DuplicateLinkTitle(link.title().to_string()));
            }
        }
        Ok(Self { active, links })
    }

    pub fn active(&self) -> &Document {
        &self.active
    }

    pub fn links(&self) -> &[LinkedModel] {
        &self.links
    }

    pub fn link(&self, title: &str) -> Option<&LinkedModel> {
        self.links.iter().find(|l| l.title() == title)
    }

    /// Links matching `titles` in load order; an empty selection means all links.
    ///
    /// Titles without a loaded link are skipped with a warning.
    pub fn select_links(&self, titles: &[String]) -> Vec<&LinkedModel> {
        if titles.is_empty() {
            return self.links.iter().collect();
        }
        for title in titles {
            if self.link(title).is_none() {
                tracing::warn!("Link '{}' is not loaded in '{}'", title, self.active.title());
            }
        }
        self.links
            .iter()
            .filter(|l| titles.iter().any(|t| t == l.title()))
            .collect()
    }

    /// Detach a curve element of the active document for checking
    pub fn curve(&self, id: ElementId) -> Result<CurveElement, ConfigError> {
        let element = self.active.get(id).ok_or(ConfigError::ElementNotFound(id))?;
        CurveElement::from_element(element)
    }

    pub fn active_mut(&mut self) -> &mut Document {
        &mut self.active
    }
}
