use std::collections::{BTreeMap, HashMap};

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::color::ColorMap;
use crate::data::aggregate::sort_rows;
use crate::data::province::sort_provinces;
use crate::pipeline::DashboardView;

// ---------------------------------------------------------------------------
// Totals chart (central panel)
// ---------------------------------------------------------------------------

/// Bar chart of the filtered aggregates. Bars sit on species when grouped by
/// species, on provinces otherwise; provinces sharing a bar are stacked and
/// coloured apart.
pub fn totals_chart(ui: &mut Ui, view: &DashboardView, colors: Option<&ColorMap>) {
    if view.aggregates.is_empty() {
        ui.label(format!("No sightings recorded for {}.", view.selection));
        return;
    }

    let mut categories: Vec<String> = view
        .aggregates
        .iter()
        .map(|a| a.species.clone().unwrap_or_else(|| a.province.clone()))
        .collect();
    sort_provinces(&mut categories);
    categories.dedup();
    let slot: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut rows = view.aggregates.clone();
    sort_rows(&mut rows);

    // province → its bars, stacked on top of whatever is already at that slot
    let mut stacks: Vec<f64> = vec![0.0; categories.len()];
    let mut per_province: BTreeMap<&str, Vec<Bar>> = BTreeMap::new();
    for row in &rows {
        let category = row.species.as_deref().unwrap_or(&row.province);
        let x = slot[category];
        let height = row.total_count as f64;
        let bar = Bar::new(x as f64, height)
            .base_offset(stacks[x])
            .width(0.6)
            .name(format!("{}: {}", row.province, row.total_count));
        stacks[x] += height;
        per_province.entry(row.province.as_str()).or_default().push(bar);
    }

    let labels = categories.clone();
    Plot::new("totals_chart")
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label(if view.aggregates[0].species.is_some() {
            "Species"
        } else {
            "Province"
        })
        .y_axis_label("Total sightings")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (province, bars) in per_province {
                let color = colors
                    .map(|c| c.color_for(province))
                    .unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.bar_chart(BarChart::new(bars).name(province).color(color));
            }
        });
}

/// Axis label for integral marks that fall on a category.
fn category_label(labels: &[String], value: f64) -> String {
    let i = value.round();
    if (value - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_only_on_integral_marks() {
        let labels = vec!["Puma concolor".to_string(), "Puma yagouaroundi".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Puma concolor");
        assert_eq!(category_label(&labels, 1.0), "Puma yagouaroundi");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 2.0), "");
    }
}
