use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{FeatureCollection, GeoJson, JsonObject, JsonValue, PolygonType, Value};

use super::model::{BoundaryFeature, BoundaryLayer, Crs};
use super::province::normalize_province;
use crate::error::GeoDataError;

/// Feature property holding the province name in the national boundary files.
pub const DEFAULT_NAME_PROPERTY: &str = "provincia";

/// Load a GeoJSON FeatureCollection of province boundaries.
///
/// A collection without a `crs` member is assumed to be WGS84. That is logged
/// at warn level and flagged through [`BoundaryLayer::crs_assumed`], since the
/// true reference system was not read.
pub fn load_boundaries(path: &Path, name_property: &str) -> Result<BoundaryLayer, GeoDataError> {
    let text = std::fs::read_to_string(path).map_err(|source| GeoDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let geojson = text.parse::<GeoJson>().map_err(|source| GeoDataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeoDataError::NotFeatureCollection {
            path: path.to_path_buf(),
        });
    };

    let layer = layer_from_collection(collection, name_property)?;
    if layer.is_empty() {
        return Err(GeoDataError::Empty {
            path: path.to_path_buf(),
        });
    }

    if layer.crs_assumed {
        log::warn!(
            "{} declares no coordinate reference system; assuming {}",
            path.display(),
            layer.crs
        );
    }
    log::info!(
        "Loaded {} boundary features from {} ({})",
        layer.len(),
        path.display(),
        layer.crs
    );

    Ok(layer)
}

fn layer_from_collection(
    collection: FeatureCollection,
    name_property: &str,
) -> Result<BoundaryLayer, GeoDataError> {
    let declared = collection.foreign_members.as_ref().and_then(declared_crs);
    let crs_assumed = declared.is_none();
    let crs = declared.unwrap_or(Crs::WGS84);

    let features = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| -> Result<BoundaryFeature, GeoDataError> {
            let name = feature
                .property(name_property)
                .and_then(JsonValue::as_str)
                .ok_or_else(|| GeoDataError::MissingName {
                    index,
                    property: name_property.to_string(),
                })?;
            let geometry = feature
                .geometry
                .as_ref()
                .ok_or(GeoDataError::MissingGeometry { index })?;
            let shape = to_multi_polygon(&geometry.value, index)?;
            Ok(BoundaryFeature::new(normalize_province(name), shape))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BoundaryLayer {
        crs,
        crs_assumed,
        features,
    })
}

// ---------------------------------------------------------------------------
// CRS detection
// ---------------------------------------------------------------------------

/// Read the (2008-style) `crs` member:
/// `{"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::5367"}}`.
fn declared_crs(members: &JsonObject) -> Option<Crs> {
    let name = members
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()?
        .trim();
    if name.is_empty() {
        return None;
    }
    Some(parse_crs_name(name))
}

fn parse_crs_name(name: &str) -> Crs {
    if name.ends_with("CRS84") {
        return Crs::WGS84;
    }
    let upper = name.to_ascii_uppercase();
    let code = upper
        .strip_prefix("EPSG:")
        .or_else(|| upper.rsplit_once("EPSG::").map(|(_, c)| c))
        .and_then(|c| c.parse::<u32>().ok());
    match code {
        Some(code) => Crs::Epsg(code),
        None => Crs::Named(name.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Geometry conversion
// ---------------------------------------------------------------------------

fn to_multi_polygon(value: &Value, index: usize) -> Result<MultiPolygon<f64>, GeoDataError> {
    match value {
        Value::Polygon(rings) => Ok(MultiPolygon::new(vec![to_polygon(rings, index)?])),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| to_polygon(rings, index))
            .collect::<Result<Vec<_>, _>>()
            .map(MultiPolygon::new),
        other => Err(GeoDataError::UnsupportedGeometry {
            index,
            kind: geometry_kind(other).to_string(),
        }),
    }
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn to_polygon(rings: &PolygonType, index: usize) -> Result<Polygon<f64>, GeoDataError> {
    let mut rings = rings.iter().map(|ring| {
        ring.iter()
            .map(|pos| match pos.as_slice() {
                [x, y, ..] => Ok(Coord { x: *x, y: *y }),
                _ => Err(GeoDataError::InvalidCoordinates { index }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(LineString::new)
    });
    let exterior = match rings.next() {
        Some(ring) => ring?,
        None => LineString::new(Vec::new()),
    };
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}
