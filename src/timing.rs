//! Wall-clock timing for engine comparisons
//!
//! Thin helpers around `std::time::Instant` so demos and benches report
//! elapsed times the same way. Criterion owns statistically rigorous
//! measurement; this module only covers the one-shot "how long did that
//! take" readings the comparison harnesses print.

use std::fmt;
use std::time::{Duration, Instant};

// =================================================================================================
// One-Shot Timing
// =================================================================================================

/// Run a closure once, returning its output with the elapsed wall time
pub fn time_once<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let output = f();
    (output, start.elapsed())
}

// =================================================================================================
// Measurement
// =================================================================================================

/// A labeled elapsed-time reading
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// What was timed (typically an engine name)
    pub label: String,

    /// Elapsed wall time
    pub elapsed: Duration,
}

impl Measurement {
    pub fn new(label: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            label: label.into(),
            elapsed,
        }
    }

    /// Elapsed time in milliseconds
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time taken ({}) (ms): {}", self.label, self.millis())
    }
}

// =================================================================================================
// Overhead Report
// =================================================================================================

/// An ordered collection of measurements from one comparison run
#[derive(Debug, Clone, Default)]
pub struct OverheadReport {
    measurements: Vec<Measurement>,
}

impl OverheadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement, preserving insertion order
    pub fn push(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Time a closure and record the reading under `label`
    pub fn time<T, F: FnOnce() -> T>(&mut self, label: impl Into<String>, f: F) -> T {
        let (output, elapsed) = time_once(f);
        self.push(Measurement::new(label, elapsed));
        output
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter()
    }

    /// Ratio of each measurement's time to the fastest one recorded
    ///
    /// Returns `None` when empty or when the fastest reading is zero.
    pub fn relative_overheads(&self) -> Option<Vec<(String, f64)>> {
        let fastest = self
            .measurements
            .iter()
            .map(|m| m.elapsed.as_secs_f64())
            .fold(f64::INFINITY, f64::min);

        if !fastest.is_finite() || fastest <= 0.0 {
            return None;
        }

        Some(
            self.measurements
                .iter()
                .map(|m| (m.label.clone(), m.elapsed.as_secs_f64() / fastest))
                .collect(),
        )
    }
}

impl fmt::Display for OverheadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for measurement in &self.measurements {
            writeln!(f, "{}", measurement)?;
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_once_returns_output() {
        let (value, elapsed) = time_once(|| 40 + 2);
        assert_eq!(value, 42);
        assert!(elapsed >= Duration::ZERO);
    }

    #[test]
    fn test_measurement_millis() {
        let m = Measurement::new("demo", Duration::from_micros(1500));
        assert!((m.millis() - 1.5).abs() < 1e-9);
        assert!(m.to_string().starts_with("Time taken (demo) (ms):"));
    }

    #[test]
    fn test_report_records_in_order() {
        let mut report = OverheadReport::new();
        report.push(Measurement::new("a", Duration::from_millis(2)));
        let value = report.time("b", || 7);

        assert_eq!(value, 7);
        assert_eq!(report.len(), 2);
        let labels: Vec<_> = report.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn test_relative_overheads() {
        let mut report = OverheadReport::new();
        report.push(Measurement::new("fast", Duration::from_millis(10)));
        report.push(Measurement::new("slow", Duration::from_millis(40)));

        let ratios = report.relative_overheads().unwrap();
        assert_eq!(ratios[0], ("fast".to_string(), 1.0));
        assert!((ratios[1].1 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_relative_overheads_empty() {
        assert!(OverheadReport::new().relative_overheads().is_none());
    }
}
