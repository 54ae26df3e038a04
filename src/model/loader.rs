//! Scene loading from JSON
//!
//! A scene file describes the active document and its links:
//!
//! ```json
//! {
//!   "active": { "title": "Project", "elements": [ ... ] },
//!   "links": [ { "offset": [0, 0, 0], "document": { "title": "KR", "elements": [] } } ]
//! }
//! ```

use glam::DVec3;
use serde::Deserialize;
use std::path::Path;

use super::document::{Document, DocumentContext, LinkedModel};
use super::element::Element;
use crate::core::error::Result;

#[derive(Debug, Deserialize)]
struct DocumentData {
    title: String,
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct LinkData {
    #[serde(default)]
    offset: Option<DVec3>,
    document: DocumentData,
}

#[derive(Debug, Deserialize)]
struct SceneData {
    active: DocumentData,
    #[serde(default)]
    links: Vec<LinkData>,
}

impl DocumentData {
    fn into_document(self) -> Result<Document> {
        Ok(Document::from_elements(self.title, self.elements)?)
    }
}

/// Parse a scene and validate it into a context
pub fn context_from_json(content: &str) -> Result<DocumentContext> {
    let scene: SceneData = serde_json::from_str(content)?;
    let active = scene.active.into_document()?;
    let links = scene
        .links
        .into_iter()
        .map(|link| {
            let offset = link.offset.unwrap_or(DVec3::ZERO);
            Ok(LinkedModel::new(link.document.into_document()?, offset))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DocumentContext::new(active, links)?)
}

pub fn load_context(path: &Path) -> Result<DocumentContext> {
    let content = std::fs::read_to_string(path)?;
    let context = context_from_json(&content)?;
    tracing::info!(
        "Loaded '{}' with {} elements and {} links from {}",
        context.active().title(),
        context.active().len(),
        context.links().len(),
        path.display()
    );
    Ok(context)
}
