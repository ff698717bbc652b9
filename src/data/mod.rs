/// Data layer: core types, loading, aggregation, filtering and the map join.
///
/// Architecture:
/// ```text
///   sightings .tsv            provinces .geojson
///        │                           │
///        ▼                           ▼
///   ┌──────────┐              ┌──────────┐
///   │  loader   │              │ boundary │   (memoized by cache)
///   └──────────┘              └──────────┘
///        │                           │
///        ▼                           │
///   ┌───────────┐                    │
///   │ aggregate │  group + sum       │
///   └───────────┘                    │
///        │                           │
///        ▼                           ▼
///   ┌──────────┐               ┌──────────┐
///   │  filter   │ ────────────► │   join   │  totals → features
///   └──────────┘               └──────────┘
/// ```

pub mod aggregate;
pub mod boundary;
pub mod cache;
pub mod filter;
pub mod join;
pub mod loader;
pub mod model;
pub mod province;
