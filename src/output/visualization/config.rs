//! Shared plot configuration
//!
//! [`PlotConfig`] carries the dimensions, labels, and colors common to
//! every chart this crate renders. Chart modules take an optional
//! `&PlotConfig` and fall back to [`PlotConfig::default`].

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `bar_color`: Fill color for bars
/// - `background`: Background color
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::default();
/// config.title = "FizzBuzz Engines".to_string();
/// config.bar_color = BLUE;
/// config.width = 1920;  // Full HD
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Engine Overhead")
    pub title: String,

    /// X-axis label (default: "Engine")
    pub xlabel: String,

    /// Y-axis label (default: "Time (ms)")
    pub ylabel: String,

    /// Bar fill color (default: BLUE)
    pub bar_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Engine Overhead".to_string(),
            xlabel: "Engine".to_string(),
            ylabel: "Time (ms)".to_string(),
            bar_color: BLUE,
            background: WHITE,
            show_grid: true,
        }
    }
}
