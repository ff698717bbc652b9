use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::SightingRecord;
use super::province::normalize_province;
use crate::error::DataFormatError;

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Accepted header names per required column, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub province: Vec<String>,
    pub species: Vec<String>,
    pub count: Vec<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            province: names(&["Provincia", "stateProvince"]),
            species: names(&["Especie", "species"]),
            count: names(&["Cuenta individual", "individualCount"]),
        }
    }
}

fn find_column(
    headers: &[String],
    column: &'static str,
    candidates: &[String],
) -> Result<usize, DataFormatError> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
        .ok_or_else(|| DataFormatError::MissingColumn {
            column,
            candidates: candidates.to_vec(),
        })
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the tab-delimited sightings table.
///
/// Headers and cells are trimmed, the province column is normalized, and every
/// column not claimed by `mapping` is kept in [`SightingRecord::attributes`].
pub fn load_records(
    path: &Path,
    mapping: &ColumnMapping,
) -> Result<Vec<SightingRecord>, DataFormatError> {
    let file = File::open(path).map_err(|source| DataFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| DataFormatError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let province_idx = find_column(&headers, "province", &mapping.province)?;
    let species_idx = find_column(&headers, "species", &mapping.species)?;
    let count_idx = find_column(&headers, "count", &mapping.count)?;

    let mut records = Vec::new();
    let mut blank_counts = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(csv_err)?;
        let cell = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

        let raw_count = cell(count_idx);
        let individual_count = if raw_count.is_empty() {
            blank_counts += 1;
            0
        } else {
            parse_count(raw_count).ok_or_else(|| DataFormatError::InvalidCount {
                row: row_no + 1,
                value: raw_count.to_string(),
            })?
        };

        let mut attributes = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if idx == province_idx || idx == species_idx || idx == count_idx {
                continue;
            }
            attributes.insert(header.clone(), cell(idx).to_string());
        }

        let mut record = SightingRecord::new(
            normalize_province(cell(province_idx)),
            cell(species_idx),
            individual_count,
        );
        record.attributes = attributes;
        records.push(record);
    }

    if blank_counts > 0 {
        log::warn!(
            "{}: {blank_counts} row(s) with a blank individual count, counted as 0",
            path.display()
        );
    }
    log::info!("Loaded {} sighting records from {}", records.len(), path.display());

    Ok(records)
}

/// Parse a non-blank count cell. Integral floats (`"3.0"`) are accepted since
/// spreadsheet exports often write them that way.
pub(crate) fn parse_count(raw: &str) -> Option<u32> {
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}
