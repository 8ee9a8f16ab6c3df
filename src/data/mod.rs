/// Data layer: core types, loading, filtering, and derivation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EvDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ EvDataset │  Vec<EvRecord>, option lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply criteria → filtered indices
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌───────────┐     ┌──────────┐
///   │ aggregate  │     │  export   │  filtered rows → CSV
///   └───────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  insight  │  summaries → rotating banner entries
///   └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod insight;
pub mod loader;
pub mod model;
