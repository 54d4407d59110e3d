//! CSV export of profiles and residual histories
//!
//! # Quick Examples
//!
//! ## Profile
//!
//! ```rust,no_run
//! use adrs_rs::output::export::export_profile_csv;
//!
//! let x = vec![0.0, 0.5, 1.0];
//! let numeric = vec![0.0, 0.8, 0.0];
//! let exact = vec![0.0, 0.7, 0.0];
//!
//! export_profile_csv(
//!     &x,
//!     &[("T", numeric.as_slice()), ("T_exact", exact.as_slice())],
//!     "profile.csv",
//!     None,
//! )?;
//! # Ok::<(), adrs_rs::AdrsError>(())
//! ```
//!
//! **Output** (`profile.csv`):
//! ```csv
//! x,T,T_exact
//! 0.000000,0.000000,0.000000
//! 0.500000,0.800000,0.700000
//! 1.000000,0.000000,0.000000
//! ```
//!
//! ## With Metadata
//!
//! ```csv
//! # ADRS Simulation Data
//! # Generated: 2026-10-17T09:30:00+00:00
//! # Model: Gaussian control
//! # Solver: Multi-stage explicit
//! # Grid Points: 30
//! # Iterations: 412
//! #
//! iteration,time,residual,normalized residual
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{AdrsError, Result};
use crate::solver::SimulationResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use adrs_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    pub metadata: Option<CsvMetadata>,

    /// Header of the coordinate column of a profile (default: "x")
    pub coordinate_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            coordinate_header: "x".to_string(),
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter, comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub model_name: Option<String>,
    pub solver_name: Option<String>,
    pub grid_points: Option<usize>,
    pub iterations: Option<usize>,
    pub final_time: Option<f64>,
    /// Free `key: value` lines
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata of a finished run
    ///
    /// The model and solver names come from the result metadata when the
    /// solver recorded them.
    pub fn from_result(result: &SimulationResult) -> Self {
        Self {
            model_name: result.metadata.get("model").cloned(),
            solver_name: result.metadata.get("solver").cloned(),
            grid_points: Some(result.field.len()),
            iterations: Some(result.iterations()),
            final_time: Some(result.final_time()),
            custom: Vec::new(),
        }
    }

    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<()> {
    writeln!(out, "# ADRS Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {model}")?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {solver}")?;
    }
    if let Some(points) = metadata.grid_points {
        writeln!(out, "# Grid Points: {points}")?;
    }
    if let Some(iterations) = metadata.iterations {
        writeln!(out, "# Iterations: {iterations}")?;
    }
    if let Some(time) = metadata.final_time {
        writeln!(out, "# Final Time: {time}")?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {key}: {value}")?;
    }

    writeln!(out, "#")?;
    Ok(())
}

fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);
    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn check_finite(name: &str, values: &[f64]) -> Result<()> {
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(AdrsError::InvalidData(format!(
            "NaN or Inf in column '{name}' at row {i}"
        )));
    }
    Ok(())
}

fn write_rows<W: Write>(
    out: &mut W,
    headers: &[&str],
    columns: &[&[f64]],
    config: &CsvConfig,
) -> Result<()> {
    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(out, metadata)?;
    }

    writeln!(out, "{}", headers.join(&config.delimiter.to_string()))?;

    let rows = columns.first().map_or(0, |column| column.len());
    for i in 0..rows {
        let line: Vec<String> = columns
            .iter()
            .map(|column| format_number(column[i], config))
            .collect();
        writeln!(out, "{}", line.join(&config.delimiter.to_string()))?;
    }

    out.flush()?;
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a coordinate column followed by named field columns
///
/// # Errors
///
/// [`AdrsError::InvalidData`] for empty data, columns whose length differs
/// from `coordinates`, or NaN/Inf values; [`AdrsError::Io`] when the file
/// cannot be written.
pub fn export_profile_csv<P: AsRef<Path>>(
    coordinates: &[f64],
    columns: &[(&str, &[f64])],
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    // ============================= Validation =============================

    if coordinates.is_empty() || columns.is_empty() {
        return Err(AdrsError::InvalidData(
            "Empty data: coordinates and at least one column are required".to_string(),
        ));
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    check_finite(&configuration.coordinate_header, coordinates)?;
    for (name, values) in columns {
        if values.len() != coordinates.len() {
            return Err(AdrsError::InvalidData(format!(
                "Column '{name}' has {} values for {} coordinates",
                values.len(),
                coordinates.len()
            )));
        }
        check_finite(name, values)?;
    }

    // ============================= Write ==================================

    let mut headers = vec![configuration.coordinate_header.as_str()];
    headers.extend(columns.iter().map(|(name, _)| *name));

    let mut data: Vec<&[f64]> = vec![coordinates];
    data.extend(columns.iter().map(|(_, values)| *values));

    let mut out = BufWriter::new(File::create(output_path)?);
    write_rows(&mut out, &headers, &data, configuration)
}

/// Export the residual history of a run
///
/// Columns: iteration, time, residual, residual / res0.
pub fn export_residual_history_csv<P: AsRef<Path>>(
    result: &SimulationResult,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    if result.residual_history.is_empty() {
        return Err(AdrsError::InvalidData(
            "Empty data: the run performed no iteration".to_string(),
        ));
    }
    if result.time_points.len() != result.residual_history.len() {
        return Err(AdrsError::InvalidData(format!(
            "{} time points for {} residuals",
            result.time_points.len(),
            result.residual_history.len()
        )));
    }
    check_finite("residual", &result.residual_history)?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let iterations: Vec<f64> = (1..=result.residual_history.len())
        .map(|n| n as f64)
        .collect();
    let normalized = result.normalized_history();

    let mut out = BufWriter::new(File::create(output_path)?);
    write_rows(
        &mut out,
        &["iteration", "time", "residual", "normalized residual"],
        &[
            &iterations,
            &result.time_points,
            &result.residual_history,
            &normalized,
        ],
        configuration,
    )
}

// =================================================================================================
// Tests
// =================================================================================================
