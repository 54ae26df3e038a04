//! Check configuration with documented defaults
//!
//! One `CheckConfig` is loaded per run and handed to the services by
//! reference. The AR and KR profiles live side by side in it and never share
//! state.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::core::error::{ConfigError, Result};
use crate::core::types::{Category, ContextKind};
use crate::core::units::LengthUnit;

/// Rules deciding which elements are tested and what overlap is a collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntersectionSettings {
    pub name: String,

    /// Categories of candidate elements that are intersection-tested
    pub categories: Vec<Category>,

    /// Minimum penetration depth (display units) that counts as a collision
    ///
    /// Contact with zero depth never counts unless this is exactly zero.
    pub min_overlap: f64,
}

impl IntersectionSettings {
    /// Architectural profile: envelopes, slabs and other services
    pub fn architectural() -> Self {
        Self {
            name: "AR".to_string(),
            categories: vec![
                Category::Wall,
                Category::Floor,
                Category::Ceiling,
                Category::Roof,
                Category::Duct,
                Category::Pipe,
                Category::CableTray,
                Category::Fitting,
                Category::Equipment,
            ],
            min_overlap: 1.0,
        }
    }

    /// Structural profile: load-bearing elements only
    pub fn structural() -> Self {
        Self {
            name: "KR".to_string(),
            categories: vec![
                Category::Wall,
                Category::Floor,
                Category::Column,
                Category::Beam,
                Category::Foundation,
            ],
            min_overlap: 0.5,
        }
    }

    pub fn tests_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Minimum overlap converted into model units
    pub fn tolerance(&self, units: &UnitSettings) -> f64 {
        units.to_model(self.min_overlap)
    }
}

impl Default for IntersectionSettings {
    fn default() -> Self {
        Self::architectural()
    }
}

/// Which documents one context draws its obstacles from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextSettings {
    /// Test elements of the active document
    pub check_active: bool,

    /// Test elements of linked documents
    pub check_links: bool,

    /// Link titles belonging to this context; empty selects every loaded link
    pub link_titles: Vec<String>,

    pub wall_intersection: IntersectionSettings,
}

impl ContextSettings {
    pub fn architectural() -> Self {
        Self {
            check_active: true,
            check_links: true,
            link_titles: Vec::new(),
            wall_intersection: IntersectionSettings::architectural(),
        }
    }

    pub fn structural() -> Self {
        Self {
            check_active: true,
            check_links: true,
            link_titles: Vec::new(),
            wall_intersection: IntersectionSettings::structural(),
        }
    }
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self::architectural()
    }
}

/// Display unit used in settings files and the model's internal unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitSettings {
    pub display: LengthUnit,
    pub model: LengthUnit,
}

impl UnitSettings {
    /// Convert a display-unit length into model units
    pub fn to_model(&self, value: f64) -> f64 {
        self.display.convert(value, self.model)
    }

    pub fn to_display(&self, value: f64) -> f64 {
        self.model.convert(value, self.display)
    }
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            display: LengthUnit::Millimeters,
            model: LengthUnit::Feet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    pub units: UnitSettings,

    /// Distance (display units) a collision-resolution probe displaces by
    pub clearance: f64,

    /// Maximum distance (display units) from a static neighbor's anchor point
    /// to the displaced centerline for the connection to remain valid
    pub anchor_reach: f64,

    /// Padding (display units) added to query regions before candidate filtering
    pub search_margin: f64,

    #[serde(
        default = "ContextSettings::architectural",
        deserialize_with = "architectural_overrides"
    )]
    pub ar: ContextSettings,

    #[serde(
        default = "ContextSettings::structural",
        deserialize_with = "structural_overrides"
    )]
    pub kr: ContextSettings,
}

/// Fields given in a settings file for one context; the rest come from its profile
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ContextOverrides {
    check_active: Option<bool>,
    check_links: Option<bool>,
    link_titles: Option<Vec<String>>,
    wall_intersection: IntersectionOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct IntersectionOverrides {
    name: Option<String>,
    categories: Option<Vec<Category>>,
    min_overlap: Option<f64>,
}

impl ContextOverrides {
    fn apply(self, mut base: ContextSettings) -> ContextSettings {
        if let Some(v) = self.check_active {
            base.check_active = v;
        }
        if let Some(v) = self.check_links {
            base.check_links = v;
        }
        if let Some(v) = self.link_titles {
            base.link_titles = v;
        }
        let walls = self.wall_intersection;
        if let Some(v) = walls.name {
            base.wall_intersection.name = v;
        }
        if let Some(v) = walls.categories {
            base.wall_intersection.categories = v;
        }
        if let Some(v) = walls.min_overlap {
            base.wall_intersection.min_overlap = v;
        }
        base
    }
}

fn architectural_overrides<'de, D>(deserializer: D) -> std::result::Result<ContextSettings, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ContextOverrides::deserialize(deserializer)?.apply(ContextSettings::architectural()))
}

fn structural_overrides<'de, D>(deserializer: D) -> std::result::Result<ContextSettings, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ContextOverrides::deserialize(deserializer)?.apply(ContextSettings::structural()))
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            units: UnitSettings::default(),
            clearance: 100.0,
            anchor_reach: 500.0,
            search_margin: 10.0,
            ar: ContextSettings::architectural(),
            kr: ContextSettings::structural(),
        }
    }
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CheckConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded check settings from {}", path.display());
        Ok(config)
    }

    pub fn context(&self, kind: ContextKind) -> &ContextSettings {
        match kind {
            ContextKind::Ar => &self.ar,
            ContextKind::Kr => &self.kr,
        }
    }

    pub fn clearance_model(&self) -> f64 {
        self.units.to_model(self.clearance)
    }

    pub fn anchor_reach_model(&self) -> f64 {
        self.units.to_model(self.anchor_reach)
    }

    pub fn search_margin_model(&self) -> f64 {
        self.units.to_model(self.search_margin)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        // Negated comparisons so NaN fails every check
        if !(self.clearance > 0.0) {
            return Err(ConfigError::InvalidSetting(format!(
                "clearance ({}) must be positive",
                self.clearance
            )));
        }

        // A static connection can never hold if the probe itself outruns it
        if !(self.anchor_reach >= self.clearance) {
            return Err(ConfigError::InvalidSetting(format!(
                "anchor_reach ({}) should be >= clearance ({})",
                self.anchor_reach, self.clearance
            )));
        }

        if !(self.search_margin >= 0.0) {
            return Err(ConfigError::InvalidSetting(format!(
                "search_margin ({}) must be a non-negative number",
                self.search_margin
            )));
        }

        for kind in ContextKind::ORDER {
            let context = self.context(kind);
            if !context.check_active && !context.check_links {
                return Err(ConfigError::NoDocumentSource);
            }
            if !(context.wall_intersection.min_overlap >= 0.0) {
                return Err(ConfigError::InvalidSetting(format!(
                    "{} min_overlap ({}) must be a non-negative number",
                    kind, context.wall_intersection.min_overlap
                )));
            }
        }

        Ok(())
    }
}
