//! Export of simulation results
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the file format; each format lives in its
//! own sub-module. CSV is the only one shipped.
//!
//! # Usage example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use adrs_rs::inverse::ControlProblem;
//! use adrs_rs::output::export::{CsvExporter, Exporter};
//!
//! let result = ControlProblem::default().forward(30, &[1.0, 2.0])?;
//! let exporter = CsvExporter::default();
//!
//! exporter.export_profile(&result, Path::new("field.csv"))?;
//! exporter.export_history(&result, Path::new("residuals.csv"))?;
//! # Ok::<(), adrs_rs::AdrsError>(())
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvMetadata, export_profile_csv, export_residual_history_csv};

use std::path::Path;

use crate::error::Result;
use crate::solver::SimulationResult;

/// Writes a [`SimulationResult`] to disk
pub trait Exporter {
    /// Final field against the node coordinates
    fn export_profile(&self, result: &SimulationResult, path: &Path) -> Result<()>;

    /// Residual history, one row per outer iteration
    fn export_history(&self, result: &SimulationResult, path: &Path) -> Result<()>;
}

/// CSV [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    fn export_profile(&self, result: &SimulationResult, path: &Path) -> Result<()> {
        export_profile_csv(
            result.coordinates.as_slice(),
            &[("T", result.field.as_slice())],
            path,
            Some(&self.config),
        )
    }

    fn export_history(&self, result: &SimulationResult, path: &Path) -> Result<()> {
        export_residual_history_csv(result, path, Some(&self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::ConvergenceStatus;
    use nalgebra::DVector;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_csv_exporter_writes_both_files() {
        let result = SimulationResult::new(
            DVector::from_vec(vec![0.0, 1.0, 0.0]),
            DVector::from_vec(vec![0.0, 0.5, 1.0]),
            vec![1.0, 0.1],
            vec![0.01, 0.02],
            1.0,
            ConvergenceStatus::Converged,
        );
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::default();

        exporter
            .export_profile(&result, &dir.path().join("field.csv"))
            .unwrap();
        exporter
            .export_history(&result, &dir.path().join("history.csv"))
            .unwrap();

        let field = fs::read_to_string(dir.path().join("field.csv")).unwrap();
        assert!(field.starts_with("x,T"));
        assert!(field.contains("0.500000,1.000000"));

        let history = fs::read_to_string(dir.path().join("history.csv")).unwrap();
        assert_eq!(history.lines().count(), 3);
    }
}
