pub mod config;
pub mod error;
pub mod types;
pub mod units;

pub use config::{CheckConfig, ContextSettings, IntersectionSettings, UnitSettings};
pub use error::{ConfigError, Result, TraversabilityError};
pub use types::{Category, ContextKind, ElementId, SourceRef};
pub use units::LengthUnit;
