use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::ColorScale;
use crate::data::aggregate::Grouping;
use crate::data::boundary::DEFAULT_NAME_PROPERTY;
use crate::data::filter::Selection;
use crate::data::loader::ColumnMapping;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything one pipeline run depends on. Every field has a default, so a
/// JSON file only needs the keys it changes:
///
/// ```json
/// {
///   "sightings_path": "data/puma.tsv",
///   "grouping": { "mode": "province" },
///   "selection": { "province": "Limón" },
///   "color_scale": "Blues"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub sightings_path: PathBuf,
    pub boundaries_path: PathBuf,
    pub columns: ColumnMapping,
    /// Feature property holding the province name.
    pub boundary_name_property: String,
    pub grouping: Grouping,
    pub selection: Selection,
    pub color_scale: ColorScale,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sightings_path: PathBuf::from("Puma/puma_concolor.csv"),
            boundaries_path: PathBuf::from("Puma/provincias.geojson"),
            columns: ColumnMapping::default(),
            boundary_name_property: DEFAULT_NAME_PROPERTY.to_string(),
            grouping: Grouping::default(),
            selection: Selection::All,
            color_scale: ColorScale::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON configuration file. Relative input paths are resolved
    /// against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.sightings_path = base.join(&config.sightings_path);
            config.boundaries_path = base.join(&config.boundaries_path);
        }
        Ok(config)
    }
}
