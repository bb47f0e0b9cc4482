//! Bar-chart rendering for engine comparison reports
//!
//! This module uses the `plotters` library to render an
//! [`OverheadReport`] as a bar chart, one bar per engine, in the order
//! the measurements were recorded.
//!
//! # Example
//!
//! ```rust,ignore
//! use fizz_rs::output::visualization::{plot_overhead_chart, PlotConfig};
//!
//! // After timing each engine into `report`
//! plot_overhead_chart(&report, "overhead.png", None)?;
//!
//! // Or with a custom title
//! let mut config = PlotConfig::default();
//! config.title = "FizzBuzz at N = 100000".to_string();
//! plot_overhead_chart(&report, "overhead.png", Some(&config))?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::PlotConfig;
use crate::timing::OverheadReport;

// =================================================================================================
// Drawing
// =================================================================================================

/// Helper function to draw the bar chart on any drawing area
fn draw_bars_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    report: &OverheadReport,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let labels: Vec<String> = report.iter().map(|m| m.label.clone()).collect();
    let timings: Vec<f64> = report.iter().map(|m| m.millis()).collect();
    let n_bars = timings.len();

    // Build margin (10% headroom above the tallest bar)
    let max_time = timings.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let y_max = if max_time > 0.0 { max_time * 1.1 } else { 1.0 };

    root.fill(&config.background)?;

    // Create chart
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..n_bars as f64, 0.0..y_max)?;

    // Tick positions are bar indices; map them back to measurement
    // labels
    let label_formatter = |x: &f64| {
        let index = x.floor() as usize;
        labels.get(index).cloned().unwrap_or_default()
    };

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_labels(n_bars)
        .x_label_formatter(&label_formatter);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    // Draw one rectangle per measurement
    chart.draw_series(timings.iter().enumerate().map(|(i, millis)| {
        Rectangle::new(
            [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *millis)],
            config.bar_color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Plotting Functions
// =================================================================================================

/// Plot an overhead report as a bar chart
///
/// The backend is chosen from the file extension: `.svg` renders a
/// vector image, anything else renders a PNG bitmap.
///
/// # Arguments
///
/// * `report` - Measurements from a comparison run
/// * `output_path` - Output file path (.png or .svg)
/// * `configuration` - Optional PlotConfig (uses defaults if None)
///
/// # Errors
///
/// Returns error if:
/// - The report is empty
/// - The file cannot be written
/// - Rendering fails
///
/// # Example
///
/// ```rust,ignore
/// plot_overhead_chart(&report, "overhead.png", None)?;
/// ```
pub fn plot_overhead_chart(
    report: &OverheadReport,
    output_path: &str,
    configuration: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if report.is_empty() {
        return Err("Empty report: at least one measurement is required".into());
    }

    let owned_config = configuration.cloned().unwrap_or_default();
    let config = &owned_config;

    // Create backend
    if output_path.ends_with(".svg") {
        let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_bars_on_area(&root, report, config)
    } else {
        let root =
            BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_bars_on_area(&root, report, config)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
