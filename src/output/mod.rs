//! Output of simulation results
//!
//! Plotting is left to external tools; this module writes the data they
//! read.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait, CsvExporter
//!     └── csv.rs          ← CSV writers
//! ```

pub mod export;

pub use export::{
    CsvConfig, CsvExporter, CsvMetadata, Exporter, export_profile_csv, export_residual_history_csv,
};
