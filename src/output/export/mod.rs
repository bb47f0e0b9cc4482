//! Export module for comparison reports
//!
//! Each format is an independent implementation in its own sub-module,
//! so adding a new format means adding a file without modifying
//! existing code.
//!
//! # Available formats
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use fizz_rs::output::export::{export_report_csv, CsvConfig, CsvMetadata};
//!
//! // Plain export
//! export_report_csv(&report, "timings.csv", None)?;
//!
//! // With a metadata header
//! let config = CsvConfig::default()
//!     .with_metadata(CsvMetadata::from_run(100_000, "[8334, 8333, 8333]"));
//! export_report_csv(&report, "timings.csv", Some(&config))?;
//! ```

pub mod csv;

// Re-export the most commonly used items at the module level so users can write:
//   use fizz_rs::output::export::{export_report_csv, CsvConfig};
// instead of the full sub-module path.
pub use csv::{export_report_csv, CsvConfig, CsvMetadata};
