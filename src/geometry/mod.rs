//! Geometry primitives and the kernel seam

mod aabb;
mod frame;
mod kernel;
mod solid;

pub use aabb::Aabb;
pub use frame::{distance_to_segment, LocalFrame};
pub use kernel::{BoxKernel, GeometryKernel, Overlap};
pub use solid::Solid;
