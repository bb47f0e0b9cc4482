//! Output module for comparison results
//!
//! This module provides tools to output timing reports in various formats:
//! - **Visualization**: PNG/SVG bar charts using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── overhead_chart.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ## Visualization
//!
//! ```rust,ignore
//! use fizz_rs::output::visualization::plot_overhead_chart;
//!
//! // Generate PNG bar chart
//! plot_overhead_chart(&report, "overhead.png", None)?;
//! ```
//!
//! ## CSV Export
//!
//! ```rust,ignore
//! use fizz_rs::output::export::export_report_csv;
//!
//! // Export to CSV
//! export_report_csv(&report, "timings.csv", None)?;
//! ```
//!
//! # Design Philosophy
//!
//! The output module separates concerns:
//! - **Visualization**: For human interpretation (charts)
//! - **Export**: For programmatic analysis (CSV)
//!
//! Both sub-modules consume the same [`crate::timing::OverheadReport`].

pub mod export;
pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{plot_overhead_chart, PlotConfig};

pub use export::{export_report_csv, CsvConfig, CsvMetadata};
