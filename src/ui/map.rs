use eframe::egui::{self, pos2, vec2, Color32, Mesh, Pos2, Rect, Sense, Shape, Stroke, Ui};
use geo::{BoundingRect, Contains, Coord, Point, TriangulateEarcut};

use crate::color::ChoroplethScale;
use crate::data::model::BoundaryFeature;
use crate::pipeline::DashboardView;

// ---------------------------------------------------------------------------
// Choropleth (central panel)
// ---------------------------------------------------------------------------

/// Equirectangular fit of the layer's bounding box into a screen rect,
/// keeping the aspect ratio and flipping y (north up).
struct Projection {
    min: Coord<f64>,
    max_y: f64,
    scale: f64,
    origin: Pos2,
}

impl Projection {
    fn fit(features: &[BoundaryFeature], rect: Rect) -> Option<Self> {
        let bounds = features
            .iter()
            .filter_map(|f| f.geometry.bounding_rect())
            .reduce(|a, b| {
                geo::Rect::new(
                    Coord {
                        x: a.min().x.min(b.min().x),
                        y: a.min().y.min(b.min().y),
                    },
                    Coord {
                        x: a.max().x.max(b.max().x),
                        y: a.max().y.max(b.max().y),
                    },
                )
            })?;
        let (w, h) = (bounds.width(), bounds.height());
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        let scale = (rect.width() as f64 / w).min(rect.height() as f64 / h);
        let used = vec2((w * scale) as f32, (h * scale) as f32);
        Some(Self {
            min: bounds.min(),
            max_y: bounds.max().y,
            scale,
            origin: rect.center() - used / 2.0,
        })
    }

    fn to_screen(&self, c: Coord<f64>) -> Pos2 {
        pos2(
            self.origin.x + ((c.x - self.min.x) * self.scale) as f32,
            self.origin.y + ((self.max_y - c.y) * self.scale) as f32,
        )
    }

    fn to_world(&self, p: Pos2) -> Point<f64> {
        Point::new(
            self.min.x + (p.x - self.origin.x) as f64 / self.scale,
            self.max_y - (p.y - self.origin.y) as f64 / self.scale,
        )
    }
}

/// Render the joined boundary features coloured by total sightings.
pub fn choropleth(ui: &mut Ui, view: &DashboardView, scale: &ChoroplethScale) {
    let width = ui.available_width().min(900.0);
    let (response, painter) = ui.allocate_painter(vec2(width, width * 0.75), Sense::hover());

    let Some(projection) = Projection::fit(&view.features, response.rect) else {
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            "Boundaries have no extent",
            egui::FontId::default(),
            Color32::GRAY,
        );
        return;
    };

    let hovered = response.hover_pos().and_then(|pos| {
        let point = projection.to_world(pos);
        view.features.iter().find(|f| f.geometry.contains(&point))
    });

    for feature in &view.features {
        let fill = scale.color_for(feature.total_sightings);
        let mut mesh = Mesh::default();
        for polygon in &feature.geometry.0 {
            for triangle in polygon.earcut_triangles() {
                let base = mesh.vertices.len() as u32;
                for corner in triangle.to_array() {
                    mesh.colored_vertex(projection.to_screen(corner), fill);
                }
                mesh.add_triangle(base, base + 1, base + 2);
            }
        }
        painter.add(Shape::mesh(mesh));

        let is_hovered = hovered.is_some_and(|h| std::ptr::eq(h, feature));
        let stroke = if is_hovered {
            Stroke::new(2.5, Color32::BLACK)
        } else {
            Stroke::new(1.0, Color32::DARK_GRAY)
        };
        for polygon in &feature.geometry.0 {
            let outline: Vec<Pos2> = polygon
                .exterior()
                .coords()
                .map(|c| projection.to_screen(*c))
                .collect();
            painter.add(Shape::closed_line(outline, stroke));
        }
    }

    if let Some(feature) = hovered {
        response.on_hover_text(format!(
            "{}\nTotal sightings: {:.0}",
            feature.province_name, feature.total_sightings
        ));
    }

    legend(ui, scale, &view.selection.to_string());
}

/// Horizontal colour legend under the map.
fn legend(ui: &mut Ui, scale: &ChoroplethScale, subject: &str) {
    ui.label(format!("Total sightings ({subject})"));
    ui.horizontal(|ui: &mut Ui| {
        for (label, color) in scale.legend_entries(6) {
            let (rect, _) = ui.allocate_exact_size(vec2(24.0, 12.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(label);
        }
    });
}
