use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::pipeline::DashboardView;

const ROW_HEIGHT: f32 = 18.0;

/// Filtered sighting records: the three pipeline columns first, then every
/// other column of the source file.
pub fn records_table(ui: &mut Ui, view: &DashboardView) {
    if view.records.is_empty() {
        ui.label(format!("No records for {}.", view.selection));
        return;
    }

    let extra: Vec<&String> = view
        .records
        .first()
        .map(|r| r.attributes.keys().collect())
        .unwrap_or_default();

    ScrollArea::horizontal()
        .id_salt("records_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .columns(Column::auto().at_least(60.0), 3 + extra.len())
                .max_scroll_height(260.0)
                .header(ROW_HEIGHT + 2.0, |mut header| {
                    for name in ["Province", "Species", "Count"] {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                    for name in &extra {
                        header.col(|ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, view.records.len(), |mut row| {
                        let record = &view.records[row.index()];
                        row.col(|ui| {
                            ui.label(&record.province);
                        });
                        row.col(|ui| {
                            ui.label(&record.species);
                        });
                        row.col(|ui| {
                            ui.label(record.individual_count.to_string());
                        });
                        for name in &extra {
                            row.col(|ui| {
                                ui.label(
                                    record.attributes.get(*name).map(String::as_str).unwrap_or(""),
                                );
                            });
                        }
                    });
                });
        });
}
