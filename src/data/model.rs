use std::collections::BTreeMap;
use std::fmt;

use geo::MultiPolygon;

// ---------------------------------------------------------------------------
// SightingRecord – one row of the sightings table
// ---------------------------------------------------------------------------

/// A single sighting row after header matching and province normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SightingRecord {
    /// Canonical (accented) province name; empty if the cell was blank.
    pub province: String,
    /// Species name; empty if the cell was blank.
    pub species: String,
    pub individual_count: u32,
    /// Every other column of the row: trimmed header → trimmed cell.
    pub attributes: BTreeMap<String, String>,
}

impl SightingRecord {
    /// Convenience constructor for rows without extra columns.
    pub fn new(province: impl Into<String>, species: impl Into<String>, count: u32) -> Self {
        Self {
            province: province.into(),
            species: species.into(),
            individual_count: count,
            attributes: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// AggregateRow – one group of the aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub province: String,
    /// Present only when grouping by province and species.
    pub species: Option<String>,
    pub total_count: u64,
}

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

/// Coordinate reference system of a boundary collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crs {
    Epsg(u32),
    /// A declared name we could not reduce to an EPSG code.
    Named(String),
}

impl Crs {
    /// WGS84, assigned when a collection declares nothing.
    pub const WGS84: Crs = Crs::Epsg(4326);
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{code}"),
            Crs::Named(name) => write!(f, "{name}"),
        }
    }
}

/// One province polygon and the total joined onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub province_name: String,
    pub geometry: MultiPolygon<f64>,
    pub total_sightings: f64,
}

impl BoundaryFeature {
    pub fn new(province_name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            province_name: province_name.into(),
            geometry,
            total_sightings: 0.0,
        }
    }
}

/// The loaded boundary collection.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLayer {
    pub crs: Crs,
    /// `true` when `crs` was assigned because the file declared none.
    pub crs_assumed: bool,
    pub features: Vec<BoundaryFeature>,
}

impl BoundaryLayer {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
