//! Writes a small deterministic dataset into `sample/`:
//! `puma_concolor.tsv` (sightings), `provincias.geojson` (coarse province
//! boxes, no `crs` member) and `dashboard.json` pointing at both. Some rows
//! use unaccented province spellings and some leave the count blank so the
//! loader's recovery paths show up.
//!
//! Open it with `puma-atlas sample/dashboard.json`.

use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// (canonical name, spelling used in some rows, lon/lat box, rows to emit)
const PROVINCES: &[(&str, &str, [f64; 4], usize)] = &[
    ("Guanacaste", "Guanacaste", [-86.0, 10.0, -85.0, 11.2], 40),
    ("Alajuela", "Alajuela", [-85.0, 10.0, -84.1, 11.1], 25),
    ("Heredia", "Heredia", [-84.1, 10.0, -83.7, 10.8], 12),
    ("Limón", "Limon", [-83.7, 9.4, -82.6, 10.9], 30),
    ("Puntarenas", "Puntarenas", [-85.0, 8.0, -82.9, 9.4], 55),
    ("San José", "San Jose", [-84.4, 9.4, -83.9, 10.0], 8),
    ("Cartago", "Cartago", [-83.9, 9.4, -83.7, 10.0], 0),
];

const SPECIES: &[&str] = &["Puma concolor", "Herpailurus yagouaroundi"];

fn write_sightings(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["gbifID", "Provincia", "Especie", "Cuenta individual", "Año"])?;

    let mut row_id: u64 = 1_000_000;
    for &(canonical, variant, _, rows) in PROVINCES {
        for i in 0..rows {
            let province = if i % 3 == 0 { variant } else { canonical };
            let species = if rng.below(5) == 0 { SPECIES[1] } else { SPECIES[0] };
            let count = if rng.below(13) == 0 {
                String::new()
            } else {
                (1 + rng.below(3)).to_string()
            };
            let year = (2005 + rng.below(19)).to_string();

            writer.write_record([
                row_id.to_string().as_str(),
                province,
                species,
                count.as_str(),
                year.as_str(),
            ])?;
            row_id += 1;
        }
    }
    writer.flush()?;
    Ok((row_id - 1_000_000) as usize)
}

fn province_feature(name: &str, [x0, y0, x1, y1]: [f64; 4]) -> Feature {
    let ring = vec![
        vec![x0, y0],
        vec![x1, y0],
        vec![x1, y1],
        vec![x0, y1],
        vec![x0, y0],
    ];
    let mut properties = JsonObject::new();
    properties.insert("provincia".to_string(), JsonValue::from(name));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn write_boundaries(path: &Path) -> Result<usize> {
    let features: Vec<Feature> = PROVINCES
        .iter()
        .map(|&(name, _, bbox, _)| province_feature(name, bbox))
        .collect();
    let count = features.len();
    let collection = GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    });
    std::fs::write(path, collection.to_string())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(count)
}

/// Paths are relative to the config file's own directory.
fn write_config(path: &Path, sightings: &str, boundaries: &str) -> Result<()> {
    let config = serde_json::json!({
        "sightings_path": sightings,
        "boundaries_path": boundaries,
    });
    let text = serde_json::to_string_pretty(&config)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let out_dir = Path::new("sample");
    std::fs::create_dir_all(out_dir).context("creating sample/")?;

    let sightings = out_dir.join("puma_concolor.tsv");
    let rows = write_sightings(&sightings, &mut rng)?;

    let boundaries = out_dir.join("provincias.geojson");
    let features = write_boundaries(&boundaries)?;

    let config = out_dir.join("dashboard.json");
    write_config(&config, "puma_concolor.tsv", "provincias.geojson")?;

    println!(
        "Wrote {rows} sightings to {} and {features} provinces to {}",
        sightings.display(),
        boundaries.display()
    );
    println!("Run: puma-atlas {}", config.display());
    Ok(())
}
