/// Data layer: core types, artifact loading, table projection, and image
/// normalization.
///
/// Architecture:
/// ```text
///  .json.gz / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decompress + parse → ClusterDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ClusterDataset  │  Vec<ClusterRecord>, label range
///   └────────────────┘
///        │                         │
///        ▼                         ▼
///   ┌──────────┐            ┌──────────┐
///   │  table    │            │  image    │  normalize → 8-bit RGB → PNG
///   └──────────┘            └──────────┘
///        │
///        ▼
///   PointTable (drives the scatter plot)
/// ```

pub mod image;
pub mod loader;
pub mod model;
pub mod table;
