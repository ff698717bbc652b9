use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::boundary::load_boundaries;
use super::loader::{load_records, ColumnMapping};
use super::model::{BoundaryLayer, SightingRecord};
use crate::error::{DataFormatError, GeoDataError};

/// Which loader produced an entry, including the parameters that change its
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LoadOp {
    Records(ColumnMapping),
    Boundaries { name_property: String },
}

#[derive(Debug, Clone)]
enum Cached {
    Records(Arc<Vec<SightingRecord>>),
    Boundaries(Arc<BoundaryLayer>),
}

/// Memoized loads keyed by (operation, path).
///
/// Entries live until [`LoadCache::invalidate`] or [`LoadCache::clear`]; a
/// file edited on disk keeps serving the old content until then. Failed loads
/// are not stored.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: Mutex<HashMap<(LoadOp, PathBuf), Cached>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(
        &self,
        path: &Path,
        mapping: &ColumnMapping,
    ) -> Result<Arc<Vec<SightingRecord>>, DataFormatError> {
        let key = (LoadOp::Records(mapping.clone()), path.to_path_buf());
        if let Some(Cached::Records(hit)) = self.lock().get(&key) {
            log::debug!("cache hit: records {}", path.display());
            return Ok(Arc::clone(hit));
        }

        log::debug!("cache miss: records {}", path.display());
        let loaded = Arc::new(load_records(path, mapping)?);
        self.lock().insert(key, Cached::Records(Arc::clone(&loaded)));
        Ok(loaded)
    }

    pub fn boundaries(
        &self,
        path: &Path,
        name_property: &str,
    ) -> Result<Arc<BoundaryLayer>, GeoDataError> {
        let key = (
            LoadOp::Boundaries {
                name_property: name_property.to_string(),
            },
            path.to_path_buf(),
        );
        if let Some(Cached::Boundaries(hit)) = self.lock().get(&key) {
            log::debug!("cache hit: boundaries {}", path.display());
            return Ok(Arc::clone(hit));
        }

        log::debug!("cache miss: boundaries {}", path.display());
        let loaded = Arc::new(load_boundaries(path, name_property)?);
        self.lock()
            .insert(key, Cached::Boundaries(Arc::clone(&loaded)));
        Ok(loaded)
    }

    /// Drop every entry loaded from `path`, whatever the operation.
    pub fn invalidate(&self, path: &Path) {
        self.lock().retain(|(_, p), _| p != path);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned map is still a valid map; keep serving it.
    fn lock(&self) -> MutexGuard<'_, HashMap<(LoadOp, PathBuf), Cached>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::boundary::DEFAULT_NAME_PROPERTY;
    use tempfile::TempDir;

    const TSV: &str = "Provincia\tEspecie\tCuenta individual\nLimon\tPuma concolor\t3\n";
    const GEOJSON: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"provincia": "Limón"},
         "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
    ]}"#;

    fn fixture() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let tsv = dir.path().join("puma.tsv");
        let geo = dir.path().join("provincias.geojson");
        std::fs::write(&tsv, TSV).unwrap();
        std::fs::write(&geo, GEOJSON).unwrap();
        (dir, tsv, geo)
    }

    #[test]
    fn test_repeated_loads_share_the_result() {
        let (_dir, tsv, geo) = fixture();
        let cache = LoadCache::new();
        let mapping = ColumnMapping::default();

        let a = cache.records(&tsv, &mapping).unwrap();
        let b = cache.records(&tsv, &mapping).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let c = cache.boundaries(&geo, DEFAULT_NAME_PROPERTY).unwrap();
        let d = cache.boundaries(&geo, DEFAULT_NAME_PROPERTY).unwrap();
        assert!(Arc::ptr_eq(&c, &d));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_stale_until_invalidated() {
        let (_dir, tsv, _geo) = fixture();
        let cache = LoadCache::new();
        let mapping = ColumnMapping::default();

        let first = cache.records(&tsv, &mapping).unwrap();
        std::fs::write(&tsv, "Provincia\tEspecie\tCuenta individual\nHeredia\tPuma concolor\t5\n")
            .unwrap();

        let stale = cache.records(&tsv, &mapping).unwrap();
        assert_eq!(stale[0].province, "Limón");
        assert!(Arc::ptr_eq(&first, &stale));

        cache.invalidate(&tsv);
        let fresh = cache.records(&tsv, &mapping).unwrap();
        assert_eq!(fresh[0].province, "Heredia");
    }

    #[test]
    fn test_mapping_is_part_of_the_key() {
        let (_dir, tsv, _geo) = fixture();
        let cache = LoadCache::new();

        let mut other = ColumnMapping::default();
        other.count = vec!["Cuenta individual".into()];
        cache.records(&tsv, &ColumnMapping::default()).unwrap();
        cache.records(&tsv, &other).unwrap();
        assert_eq!(cache.len(), 2);

        cache.invalidate(&tsv);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failures_are_not_cached() {
        let (dir, _tsv, geo) = fixture();
        let cache = LoadCache::new();
        let missing = dir.path().join("later.tsv");

        assert!(cache.records(&missing, &ColumnMapping::default()).is_err());
        assert!(cache.is_empty());

        std::fs::write(&missing, TSV).unwrap();
        assert!(cache.records(&missing, &ColumnMapping::default()).is_ok());

        cache.boundaries(&geo, DEFAULT_NAME_PROPERTY).unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
