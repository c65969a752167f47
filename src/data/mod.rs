/// Data layer: table model, loading, and the per-render transformation pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WeatherTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ WeatherTable  │  Vec<Observation>, station universe
///   └──────────────┘
///        │  coerce: "1,234" → 1234.0, junk → None
///        ├──────────────► summary   (full table: mean / max / min + dates)
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → DerivedView (stations, range)
///   └──────────┘
///        │  normalize (optional)
///        ▼
///   ┌──────────┐
///   │   rank    │  top-10 / bottom-10
///   └──────────┘
/// ```
///
/// `view` runs the whole chain once per frame.

pub mod coerce;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod rank;
pub mod schema;
pub mod summary;
pub mod view;
