//! Plain interpreted-loop engine
//!
//! # Background
//!
//! This is the baseline every other engine is compared against: a single
//! loop over `[0, n)` dispatching each integer through the shared
//! classification rule.
//!
//! # Characteristics
//!
//! - **Dispatch**: one branch chain per integer
//! - **Allocation**: none
//! - **Machinery**: none — no graph, no tape, no vector
//!
//! # When to Use
//!
//! As the reference point. Any overhead another engine shows on top of
//! this number is the cost of that engine's machinery, not of the
//! arithmetic.

use crate::counting::{classify, ClassCounts, CountRun, Engine, Workload};

// =================================================================================================
// Scalar Engine
// =================================================================================================

/// Interpreted loop over the classification rule
///
/// # Algorithm
///
/// 1. Start with zero counts
/// 2. For each `i` in `[0, n)`: classify and record
/// 3. Return the counts
///
/// There is deliberately nothing else to say; the other engines exist to
/// show how much an execution framework adds on top of step 2.
///
/// # Example
///
/// ```rust
/// use fizz_rs::counting::{Engine, Workload};
/// use fizz_rs::engines::ScalarEngine;
///
/// let run = ScalarEngine::new().count(&Workload::new(12)).unwrap();
/// assert_eq!(run.counts.fizzbuzz, 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarEngine;

impl ScalarEngine {
    /// Create a new scalar engine
    pub fn new() -> Self {
        Self
    }
}

impl Engine for ScalarEngine {
    fn count(&self, workload: &Workload) -> Result<CountRun, String> {
        let mut counts = ClassCounts::zeros();

        for i in 0..workload.upper_bound {
            counts.record(classify(i));
        }

        let mut run = CountRun::new(counts);
        run.add_metadata("engine", self.name());
        run.add_metadata("iterations", &workload.upper_bound.to_string());

        Ok(run)
    }

    fn name(&self) -> &str {
        "Scalar Loop"
    }

    fn description(&self) -> Option<&str> {
        Some("Plain interpreted loop; the no-machinery baseline")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_engine_creation() {
        let engine = ScalarEngine::new();
        assert_eq!(engine.name(), "Scalar Loop");
    }

    #[test]
    fn test_scalar_matches_closed_form() {
        let engine = ScalarEngine::new();

        for n in [0_u32, 1, 6, 12, 100, 10_000] {
            let workload = Workload::new(n);
            let run = engine.count(&workload).unwrap();
            assert_eq!(run.counts, workload.expected(), "n = {}", n);
        }
    }

    #[test]
    fn test_scalar_empty_range() {
        let run = ScalarEngine::new().count(&Workload::new(0)).unwrap();
        assert_eq!(run.counts, ClassCounts::zeros());
    }

    #[test]
    fn test_scalar_metadata() {
        let run = ScalarEngine::new().count(&Workload::new(42)).unwrap();
        assert_eq!(run.metadata.get("iterations"), Some(&"42".to_string()));
    }
}
