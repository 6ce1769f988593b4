/// Data layer: loading, column classification, and the spectral table.
///
/// Architecture:
/// ```text
///   wide-format .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (headers + text cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  header names → spectral / metadata partition
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SpectralTable  │  wavelengths, labels, ReflectanceMatrix, MetadataTable
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  metadata predicates → sample row indices
///   └──────────┘
/// ```

pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
pub mod table;
