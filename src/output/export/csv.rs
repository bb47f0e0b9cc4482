//! CSV export functionality for engine comparison reports
//!
//! This module provides tools to export timing reports to CSV
//! (Comma-Separated Values) format, which is compatible with Excel,
//! Python pandas, and most data analysis tools.
//!
//! # Features
//!
//! - **Simple interface**: Export an [`OverheadReport`] in one call
//! - **Metadata support**: Optional `#`-prefixed header comments
//! - **Customizable**: Delimiter, precision, column headers
//! - **Validation**: Checks for empty reports and non-finite timings
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use fizz_rs::output::export::export_report_csv;
//!
//! export_report_csv(&report, "timings.csv", None)?;
//! ```
//!
//! **Output** (`timings.csv`):
//! ```csv
//! Engine,Time (ms)
//! Scalar Loop,41.523102
//! Vectorized Masks,8.104551
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use fizz_rs::output::export::{export_report_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata {
//!     workload_size: Some(100_000),
//!     ..Default::default()
//! };
//!
//! let config = CsvConfig::default().with_metadata(metadata);
//! export_report_csv(&report, "timings.csv", Some(&config))?;
//! ```
//!
//! **Output** (`timings.csv`):
//! ```csv
//! # Engine Overhead Comparison
//! # Generated: 2026-08-30T15:30:00Z
//! # Workload Size: 100000
//! #
//! Engine,Time (ms)
//! Scalar Loop,41.523102
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;

use crate::timing::OverheadReport;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `precision`: Number of decimal places (default: 6)
/// - `include_metadata`: Add header comments with run info
/// - `metadata`: Run metadata to include
/// - `label_header`: Custom header for the label column
/// - `time_header`: Custom header for the time column
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for timings (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Custom header for the label column (default: "Engine")
    pub label_header: String,

    /// Custom header for the time column (default: "Time (ms)")
    pub time_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: false,
            metadata: None,
            label_header: "Engine".to_string(),
            time_header: "Time (ms)".to_string(),
        }
    }
}

impl CsvConfig {
    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are included in the
/// CSV header.
#[derive(Clone, Default)]
pub struct CsvMetadata {
    /// Upper bound of the counted range
    pub workload_size: Option<u64>,

    /// Expected counts as a display string, e.g. "[4, 2, 2]"
    pub expected_counts: Option<String>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Create metadata from a comparison run
    pub fn from_run(workload_size: u64, expected_counts: &str) -> Self {
        Self {
            workload_size: Some(workload_size),
            expected_counts: Some(expected_counts.to_string()),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments to file
fn write_metadata_header(file: &mut File, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(file, "# Engine Overhead Comparison")?;

    // Timestamp (current time)
    let now = chrono::Utc::now();
    writeln!(file, "# Generated: {}", now.to_rfc3339())?;

    if let Some(n) = metadata.workload_size {
        writeln!(file, "# Workload Size: {}", n)?;
    }
    if let Some(counts) = &metadata.expected_counts {
        writeln!(file, "# Expected Counts: {}", counts)?;
    }

    // Custom parameters
    for (key, value) in &metadata.custom {
        writeln!(file, "# {}: {}", key, value)?;
    }

    // Separator
    writeln!(file, "#")?;

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export an overhead report to CSV
///
/// Writes one row per measurement, in the order recorded, with optional
/// metadata header comments.
///
/// # Arguments
///
/// * `report` - Measurements from a comparison run
/// * `output_path` - Output file path
/// * `configuration` - Optional CSV configuration (uses default if None)
///
/// # Errors
///
/// - Empty report
/// - Non-finite timing values
/// - File creation errors
///
/// # Example
///
/// ```rust,ignore
/// export_report_csv(&report, "timings.csv", None)?;
/// ```
pub fn export_report_csv(
    report: &OverheadReport,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if report.is_empty() {
        return Err("Empty report: at least one measurement is required".into());
    }

    if report.iter().any(|m| !m.millis().is_finite()) {
        return Err("Invalid data: NaN or Inf detected in timings".into());
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Open File ==============================

    let mut file = File::create(output_path)?;

    // ============================= Write Metadata =========================

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    // ============================= Write Header ===========================

    writeln!(
        file,
        "{}{}{}",
        configuration.label_header, configuration.delimiter, configuration.time_header
    )?;

    // ============================= Write Data =============================

    for measurement in report.iter() {
        writeln!(
            file,
            "{}{}{:.prec$}",
            measurement.label,
            configuration.delimiter,
            measurement.millis(),
            prec = configuration.precision
        )?;
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::Measurement;
    use std::fs;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn sample_report() -> OverheadReport {
        let mut report = OverheadReport::new();
        report.push(Measurement::new("Scalar Loop", Duration::from_millis(40)));
        report.push(Measurement::new(
            "Vectorized Masks",
            Duration::from_millis(8),
        ));
        report
    }

    #[test]
    fn test_export_basic() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap().to_string();

        export_report_csv(&sample_report(), &path, None).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Engine,Time (ms)");
        assert!(lines[1].starts_with("Scalar Loop,40."));
        assert!(lines[2].starts_with("Vectorized Masks,8."));
    }

    #[test]
    fn test_export_with_metadata() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap().to_string();

        let mut metadata = CsvMetadata::from_run(100_000, "[8334, 8333, 8333]");
        metadata.add_custom("Host".to_string(), "bench-box".to_string());
        let config = CsvConfig::default().with_metadata(metadata);

        export_report_csv(&sample_report(), &path, Some(&config)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Engine Overhead Comparison"));
        assert!(content.contains("# Workload Size: 100000"));
        assert!(content.contains("# Expected Counts: [8334, 8333, 8333]"));
        assert!(content.contains("# Host: bench-box"));
        assert!(content.contains("Engine,Time (ms)"));
    }

    #[test]
    fn test_export_custom_delimiter_and_precision() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap().to_string();

        let config = CsvConfig::default().delimiter(';').precision(2);
        export_report_csv(&sample_report(), &path, Some(&config)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Engine;Time (ms)"));
        assert!(content.contains("Scalar Loop;40.00"));
    }

    #[test]
    fn test_export_empty_report_fails() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap().to_string();

        let result = export_report_csv(&OverheadReport::new(), &path, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Empty report"));
    }
}
