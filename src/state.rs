use std::path::PathBuf;

use crate::color::{ChoroplethScale, ColorMap, ColorScale};
use crate::config::DashboardConfig;
use crate::data::aggregate::GroupingMode;
use crate::data::cache::LoadCache;
use crate::data::filter::Selection;
use crate::pipeline::{self, DashboardView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Current pipeline parameters; every widget edits this.
    pub config: DashboardConfig,

    /// Memoized loads shared by every re-run.
    pub cache: LoadCache,

    /// Output of the last successful run (None after an error).
    pub view: Option<DashboardView>,

    /// Bar colours, one per province.
    pub bar_colors: Option<ColorMap>,

    /// Choropleth colour scale over the joined totals.
    pub map_scale: Option<ChoroplethScale>,

    /// Pipeline error shown in the top bar.
    pub status_message: Option<String>,

    /// Non-fatal startup problem (e.g. unreadable config file).
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, notice: Option<String>) -> Self {
        let mut state = Self {
            config,
            cache: LoadCache::new(),
            view: None,
            bar_colors: None,
            map_scale: None,
            status_message: None,
            notice,
        };
        state.refresh();
        state
    }

    /// Re-run the pipeline with the current config.
    pub fn refresh(&mut self) {
        match pipeline::run(&self.cache, &self.config) {
            Ok(view) => {
                log::info!(
                    "{} records, {} sightings for {}",
                    view.records.len(),
                    view.total_sightings(),
                    view.selection
                );
                self.bar_colors = Some(ColorMap::new(&view.provinces));
                self.view = Some(view);
                self.rebuild_map_scale();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to build dashboard: {e}");
                self.view = None;
                self.bar_colors = None;
                self.map_scale = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    fn rebuild_map_scale(&mut self) {
        self.map_scale = self.view.as_ref().map(|view| {
            ChoroplethScale::new(
                self.config.color_scale,
                view.features.iter().map(|f| f.total_sightings),
            )
        });
    }

    pub fn select_province(&mut self, selection: Selection) {
        if self.config.selection != selection {
            self.config.selection = selection;
            self.refresh();
        }
    }

    pub fn set_grouping_mode(&mut self, mode: GroupingMode) {
        if self.config.grouping.mode != mode {
            self.config.grouping.mode = mode;
            self.refresh();
        }
    }

    /// Only the colours change; no re-run needed.
    pub fn set_color_scale(&mut self, scale: ColorScale) {
        if self.config.color_scale != scale {
            self.config.color_scale = scale;
            self.rebuild_map_scale();
        }
    }

    pub fn set_sightings_path(&mut self, path: PathBuf) {
        self.cache.invalidate(&path);
        self.config.sightings_path = path;
        self.config.selection = Selection::All;
        self.refresh();
    }

    pub fn set_boundaries_path(&mut self, path: PathBuf) {
        self.cache.invalidate(&path);
        self.config.boundaries_path = path;
        self.refresh();
    }

    /// Drop cached files and reload them from disk.
    pub fn reload(&mut self) {
        if !self.cache.is_empty() {
            log::info!("Dropping {} cached load(s)", self.cache.len());
        }
        self.cache.clear();
        self.refresh();
    }
}
