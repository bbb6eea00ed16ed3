/// Data layer: core types, catalog, loading, and export.
///
/// Architecture:
/// ```text
///  data directory (cleaned_<YEAR>.csv files)
///        │
///        ▼
///   ┌──────────┐
///   │ catalog   │  scan directory → ordered set of YearLabel
///   └──────────┘
///        │ (selected year)
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, validate required columns → Snapshot
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Snapshot → CSV bytes, source column order
///   └──────────┘
/// ```

pub mod catalog;
pub mod export;
pub mod loader;
pub mod model;
