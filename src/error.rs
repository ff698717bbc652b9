use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Tabular input
// ---------------------------------------------------------------------------

/// The sightings table could not be read or lacks what the pipeline needs.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("cannot open sightings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sightings file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// None of the accepted header names for a required column is present.
    #[error("missing required column '{column}' (looked for {candidates:?})")]
    MissingColumn {
        column: &'static str,
        candidates: Vec<String>,
    },

    #[error("row {row}: '{value}' is not a valid individual count")]
    InvalidCount { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Boundary input
// ---------------------------------------------------------------------------

/// The boundary collection could not be read or holds no usable features.
#[derive(Debug, Error)]
pub enum GeoDataError {
    #[error("cannot open boundary file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse boundary file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: geojson::Error,
    },

    #[error("boundary file {} is not a FeatureCollection", path.display())]
    NotFeatureCollection { path: PathBuf },

    #[error("boundary file {} contains no features", path.display())]
    Empty { path: PathBuf },

    #[error("feature {index}: missing string property '{property}'")]
    MissingName { index: usize, property: String },

    #[error("feature {index}: no geometry")]
    MissingGeometry { index: usize },

    #[error("feature {index}: unsupported geometry type {kind}")]
    UnsupportedGeometry { index: usize, kind: String },

    #[error("feature {index}: position with fewer than two coordinates")]
    InvalidCoordinates { index: usize },
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// The count column the aggregation sums is absent or unusable. `row` is the
/// 1-based data row, matching [`DataFormatError::InvalidCount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissingFieldError {
    #[error("row {row}: column '{field}' is absent")]
    Column { field: String, row: usize },

    #[error("row {row}: '{value}' in column '{field}' is not a count")]
    NotNumeric {
        field: String,
        row: usize,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Pipeline boundary
// ---------------------------------------------------------------------------

/// Any failure of one pipeline run. All variants are recoverable: the shell
/// shows the message and skips rendering for that interaction.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    #[error(transparent)]
    GeoData(#[from] GeoDataError),

    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}
