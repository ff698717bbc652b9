use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sequential scales for the choropleth
// ---------------------------------------------------------------------------

/// ColorBrewer sequential scales offered in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorScale {
    #[default]
    OrRd,
    YlGn,
    Blues,
}

impl ColorScale {
    pub const ALL: [ColorScale; 3] = [ColorScale::OrRd, ColorScale::YlGn, ColorScale::Blues];

    pub fn label(self) -> &'static str {
        match self {
            ColorScale::OrRd => "Orange-Red",
            ColorScale::YlGn => "Yellow-Green",
            ColorScale::Blues => "Blues",
        }
    }

    fn stops_hex(self) -> &'static [&'static str] {
        match self {
            ColorScale::OrRd => &[
                "#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f",
                "#b30000", "#7f0000",
            ],
            ColorScale::YlGn => &[
                "#ffffe5", "#f7fcb9", "#d9f0a3", "#addd8e", "#78c679", "#41ab5d", "#238443",
                "#006837", "#004529",
            ],
            ColorScale::Blues => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
        }
    }

    /// Stops in linear RGB, lightest first.
    fn stops(self) -> Vec<LinSrgb> {
        self.stops_hex()
            .iter()
            .filter_map(|hex| Srgb::<u8>::from_str(hex).ok())
            .map(|c| c.into_format::<f32>().into_linear())
            .collect()
    }
}

/// Maps a province total to a fill colour, interpolating linearly between
/// the scale stops over `[min, max]` of the observed totals.
#[derive(Debug, Clone)]
pub struct ChoroplethScale {
    stops: Vec<LinSrgb>,
    min: f64,
    max: f64,
}

impl ChoroplethScale {
    pub fn new(scale: ColorScale, values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let (min, max) = if min <= max { (min, max) } else { (0.0, 0.0) };
        Self {
            stops: scale.stops(),
            min,
            max,
        }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let range = self.max - self.min;
        let t = if range.abs() < f64::EPSILON || !value.is_finite() {
            0.0
        } else {
            ((value - self.min) / range).clamp(0.0, 1.0)
        };
        to_color32(self.sample(t as f32))
    }

    /// `n` evenly spaced legend entries from min to max.
    pub fn legend_entries(&self, n: usize) -> Vec<(String, Color32)> {
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![(format!("{:.0}", self.min), self.color_for(self.min))];
        }
        (0..n)
            .map(|i| {
                let v = self.min + (self.max - self.min) * i as f64 / (n - 1) as f64;
                (format!("{v:.0}"), self.color_for(v))
            })
            .collect()
    }

    fn sample(&self, t: f32) -> LinSrgb {
        match self.stops.len() {
            0 => LinSrgb::new(0.5, 0.5, 0.5),
            1 => self.stops[0],
            n => {
                let pos = t * (n - 1) as f32;
                let i = (pos.floor() as usize).min(n - 2);
                self.stops[i].mix(self.stops[i + 1], pos - i as f32)
            }
        }
    }
}

fn to_color32(c: LinSrgb) -> Color32 {
    let rgb: Srgb<u8> = Srgb::<f32>::from_linear(c).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Categorical colours for the bar chart
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// One distinct colour per province, in the order given.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(provinces: &[String]) -> Self {
        let mapping = provinces
            .iter()
            .cloned()
            .zip(generate_palette(provinces.len()))
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, province: &str) -> Color32 {
        self.mapping
            .get(province)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints_match_stops() {
        let scale = ChoroplethScale::new(ColorScale::OrRd, [0.0, 5.0, 10.0]);
        assert_eq!(scale.color_for(0.0), Color32::from_rgb(0xff, 0xf7, 0xec));
        assert_eq!(scale.color_for(10.0), Color32::from_rgb(0x7f, 0x00, 0x00));
        // out of range clamps
        assert_eq!(scale.color_for(50.0), scale.color_for(10.0));
    }

    #[test]
    fn test_constant_range_uses_lightest_stop() {
        let scale = ChoroplethScale::new(ColorScale::Blues, [0.0, 0.0]);
        assert_eq!(scale.color_for(0.0), Color32::from_rgb(0xf7, 0xfb, 0xff));

        let empty = ChoroplethScale::new(ColorScale::Blues, std::iter::empty());
        assert_eq!(empty.color_for(3.0), Color32::from_rgb(0xf7, 0xfb, 0xff));
    }

    #[test]
    fn test_every_scale_parses_nine_stops() {
        for scale in ColorScale::ALL {
            assert_eq!(scale.stops().len(), 9, "{scale:?}");
        }
    }

    #[test]
    fn test_legend_entries() {
        let scale = ChoroplethScale::new(ColorScale::OrRd, [0.0, 8.0]);
        let legend = scale.legend_entries(5);
        let labels: Vec<&str> = legend.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["0", "2", "4", "6", "8"]);
        assert!(scale.legend_entries(0).is_empty());
    }

    #[test]
    fn test_color_map_distinct_and_default() {
        let provinces = vec!["Alajuela".to_string(), "Heredia".to_string()];
        let map = ColorMap::new(&provinces);
        assert_ne!(map.color_for("Alajuela"), map.color_for("Heredia"));
        assert_eq!(map.color_for("Atlantis"), Color32::GRAY);
    }
}
