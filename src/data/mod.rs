//! Data layer: core types, loading, caching and filtering.
//!
//! Architecture:
//! ```text
//!  Google Sheets CSV / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  fetch → RawTable → coerce + drop → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  cache    │  one Arc<Dataset> per DataSource until invalidated
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterCriteria → filtered indices (dataset order)
//!   └──────────┘
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
