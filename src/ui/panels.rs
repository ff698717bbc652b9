use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::ColorScale;
use crate::data::aggregate::GroupingMode;
use crate::data::filter::Selection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Puma concolor");
    ui.label("Sightings by province, Costa Rica");
    ui.separator();

    // Clone what we need so we can mutate state after the widgets.
    let (provinces, crs_note, unmatched) = match &state.view {
        Some(view) => (
            Some(view.provinces.clone()),
            view.crs_assumed
                .then(|| format!("Boundary file declares no CRS; assuming {}.", view.crs)),
            view.unmatched.clone(),
        ),
        None => (None, None, Vec::new()),
    };

    // ---- Province selector ----
    ui.strong("Province");
    match provinces {
        Some(provinces) => {
            let mut selection = state.config.selection.clone();
            egui::ComboBox::from_id_salt("province")
                .selected_text(selection.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut selection, Selection::All, Selection::All.to_string());
                    for p in &provinces {
                        ui.selectable_value(&mut selection, Selection::Province(p.clone()), p);
                    }
                });
            state.select_province(selection);
        }
        None => {
            ui.label("No dataset loaded.");
        }
    }
    ui.separator();

    // ---- Grouping ----
    ui.strong("Group by");
    let mut mode = state.config.grouping.mode;
    ui.radio_value(&mut mode, GroupingMode::ProvinceAndSpecies, "Province and species");
    ui.radio_value(&mut mode, GroupingMode::Province, "Province");
    state.set_grouping_mode(mode);
    ui.separator();

    // ---- Map colour scale ----
    ui.strong("Map colours");
    let mut scale = state.config.color_scale;
    egui::ComboBox::from_id_salt("color_scale")
        .selected_text(scale.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in ColorScale::ALL {
                ui.selectable_value(&mut scale, option, option.label());
            }
        });
    state.set_color_scale(scale);

    // ---- Data notices ----
    if crs_note.is_some() || !unmatched.is_empty() {
        ui.separator();
    }
    if let Some(note) = crs_note {
        ui.label(RichText::new(note).color(Color32::YELLOW));
    }
    if !unmatched.is_empty() {
        ui.label(
            RichText::new(format!(
                "Not on the map (no matching boundary): {}",
                unmatched.join(", ")
            ))
            .color(Color32::YELLOW),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open sightings…").clicked() {
                open_sightings_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open boundaries…").clicked() {
                open_boundaries_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(view) = &state.view {
            ui.label(format!(
                "{} records, {} sightings",
                view.records.len(),
                view.total_sightings()
            ));
        }

        if let Some(msg) = &state.notice {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_sightings_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sightings table")
        .add_filter("Tab-separated", &["csv", "tsv", "txt"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening sightings {}", path.display());
        state.set_sightings_path(path);
    }
}

pub fn open_boundaries_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open province boundaries")
        .add_filter("GeoJSON", &["geojson", "json"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening boundaries {}", path.display());
        state.set_boundaries_path(path);
    }
}
