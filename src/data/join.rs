use std::collections::{BTreeSet, HashMap};

use super::model::{AggregateRow, BoundaryFeature};

/// Boundary features with totals attached.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedLayer {
    pub features: Vec<BoundaryFeature>,
    /// Aggregate provinces that matched no feature name, sorted.
    pub unmatched: Vec<String>,
}

/// Left-join per-province totals onto boundary features.
///
/// Aggregates are summed by province first, so species-level rows work too.
/// The key is exact string equality: a spelling that differs in accents or
/// case joins nothing and the feature stays at `0.0`. Such names are reported
/// in [`JoinedLayer::unmatched`] instead of failing.
pub fn join_totals(features: &[BoundaryFeature], aggregates: &[AggregateRow]) -> JoinedLayer {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for row in aggregates {
        *totals.entry(row.province.as_str()).or_default() += row.total_count;
    }

    let joined: Vec<BoundaryFeature> = features
        .iter()
        .map(|f| BoundaryFeature {
            total_sightings: totals
                .get(f.province_name.as_str())
                .map_or(0.0, |&t| t as f64),
            ..f.clone()
        })
        .collect();

    let names: BTreeSet<&str> = features.iter().map(|f| f.province_name.as_str()).collect();
    let mut unmatched: Vec<String> = totals
        .keys()
        .filter(|p| !names.contains(*p))
        .map(|p| p.to_string())
        .collect();
    unmatched.sort();

    if !unmatched.is_empty() {
        log::warn!("No boundary feature for province(s) {unmatched:?}; their sightings are not mapped");
    }

    JoinedLayer {
        features: joined,
        unmatched,
    }
}
