use crate::config::DashboardConfig;
use crate::data::aggregate::{aggregate, province_options};
use crate::data::cache::LoadCache;
use crate::data::filter::{filter_by_province, Selection};
use crate::data::join::join_totals;
use crate::data::model::{AggregateRow, BoundaryFeature, Crs, SightingRecord};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// DashboardView – everything the shell renders for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Selector options (without the "all" sentinel), accent-aware sorted.
    pub provinces: Vec<String>,
    pub selection: Selection,
    pub records: Vec<SightingRecord>,
    pub aggregates: Vec<AggregateRow>,
    pub features: Vec<BoundaryFeature>,
    /// Provinces with sightings but no boundary feature.
    pub unmatched: Vec<String>,
    pub crs: Crs,
    pub crs_assumed: bool,
}

impl DashboardView {
    /// Map heading subject: the country when nothing is selected.
    pub fn title(&self) -> String {
        match &self.selection {
            Selection::All => "Costa Rica".to_string(),
            Selection::Province(p) => p.clone(),
        }
    }

    pub fn total_sightings(&self) -> u64 {
        self.aggregates.iter().map(|a| a.total_count).sum()
    }
}

/// Run load → aggregate → filter → join for one configuration.
pub fn run(cache: &LoadCache, config: &DashboardConfig) -> Result<DashboardView, PipelineError> {
    let records = cache.records(&config.sightings_path, &config.columns)?;
    let layer = cache.boundaries(&config.boundaries_path, &config.boundary_name_property)?;

    let aggregates = aggregate(&records, &config.grouping)?;
    let provinces = province_options(&aggregates);

    let selection = match &config.selection {
        Selection::All => Selection::All,
        Selection::Province(p) => Selection::province(p),
    };
    let filtered = filter_by_province(&records, &aggregates, &selection);
    let joined = join_totals(&layer.features, &filtered.aggregates);

    log::debug!(
        "pipeline: {} records, {} groups, selection {selection}",
        filtered.records.len(),
        filtered.aggregates.len()
    );

    Ok(DashboardView {
        provinces,
        records: filtered.records.into_owned(),
        aggregates: filtered.aggregates.into_owned(),
        features: joined.features,
        unmatched: joined.unmatched,
        crs: layer.crs.clone(),
        crs_assumed: layer.crs_assumed,
        selection,
    })
}
