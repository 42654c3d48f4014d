/// Data layer: tables, alignment, spectra and comparisons.
///
/// Architecture:
/// ```text
///  Subjects.csv   Data_trim.csv   {Filtered,Segmented}_Data/*.csv
///       │              │                     │
///       ▼              ▼                     ▼
///   ┌──────────────────────────────────────────────┐
///   │  table      CSV → named columns              │
///   └──────────────────────────────────────────────┘
///       │              │                     │
///       ▼              ▼                     ▼
///   ┌──────────┐  ┌──────────┐         ┌──────────┐
///   │ subjects │  │   trim    │───────▶│  loader   │  channels + timebase
///   └──────────┘  └──────────┘         └──────────┘
///       │                                    │
///       │                                    ▼
///       │                              ┌──────────┐
///       │                              │ spectrum  │  zero-mean |FFT|
///       │                              └──────────┘
///       ▼                                    ▼
///   ┌──────────────────────────────────────────────┐
///   │  compare    one subject × placement × N conds │
///   └──────────────────────────────────────────────┘
///                          │
///                          ▼
///                 filter (view-only slicing)
/// ```

pub mod compare;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod spectrum;
pub mod subjects;
pub mod table;
pub mod trim;
