//! In-memory model graph: elements, documents and linked sub-models

pub mod document;
pub mod element;
pub mod loader;

pub use document::{Document, DocumentContext, LinkedModel};
pub use element::{CurveElement, CurveGeometry, Element, Geometry};
pub use loader::{context_from_json, load_context};
