use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{map, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PumaAtlasApp {
    pub state: AppState,
}

impl PumaAtlasApp {
    pub fn new(config: DashboardConfig, notice: Option<String>) -> Self {
        Self {
            state: AppState::new(config, notice),
        }
    }
}

impl eframe::App for PumaAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table, chart, map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            let Some(view) = &state.view else {
                ui.centered_and_justified(|ui| {
                    ui.heading("No data to show. Open a sightings file (File → Open sightings…)");
                });
                return;
            };

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(format!("Data for {}", view.selection));
                    table::records_table(ui, view);
                    ui.separator();

                    ui.heading(format!("Sightings in {}", view.selection));
                    plot::totals_chart(ui, view, state.bar_colors.as_ref());
                    ui.separator();

                    ui.heading(format!("Total Puma concolor sightings in {}", view.title()));
                    if let Some(scale) = &state.map_scale {
                        map::choropleth(ui, view, scale);
                    }
                });
        });
    }
}
