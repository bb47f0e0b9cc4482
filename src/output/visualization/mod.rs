//! Visualization module for comparison reports
//!
//! This module provides tools to visualize timing reports using the
//! `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **overhead_chart**: Bar chart of per-engine timings
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fizz_rs::output::visualization::{plot_overhead_chart, PlotConfig};
//!
//! // Plot with default config
//! plot_overhead_chart(&report, "overhead.png", None)?;
//!
//! // Or with custom config
//! let mut config = PlotConfig::default();
//! config.title = "FizzBuzz at N = 100000".to_string();
//! plot_overhead_chart(&report, "overhead.png", Some(&config))?;
//! ```

pub mod config;
pub mod overhead_chart;

pub use config::PlotConfig;

pub use overhead_chart::plot_overhead_chart;
