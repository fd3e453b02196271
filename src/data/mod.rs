/// Data layer: records, loading, filtering and chart aggregation.
///
/// Architecture:
/// ```text
///  HTTP endpoint / .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch + loader → RecordStore (malformed rows skipped)
///   └──────────┘
///        │
///        ├──────────────► options   distinct values per dimension (once per load)
///        ▼
///   ┌──────────┐
///   │  filter   │  criteria → FilteredView (AND of per-dimension rules)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  FilteredView → ChartData (six projections)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod options;
pub mod source;
