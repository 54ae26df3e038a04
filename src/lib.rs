//! MEP Traversability - collision checks and automatic correction for service runs

pub mod core;
pub mod correction;
pub mod geometry;
pub mod host;
pub mod model;
pub mod traversability;
