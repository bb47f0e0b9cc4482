//! Execution engine traits and types
//!
//! # Design Philosophy
//!
//! The contract separates concerns into three pieces:
//! - `Workload` defines WHAT to compute (the upper bound)
//! - `Engine` defines HOW it is computed (loop, masks, graph, tape)
//! - `CountRun` carries the answer plus engine-specific metadata
//!
//! All engines compute the same counts; the only interesting difference
//! between them is the call overhead their machinery adds, which the
//! timing harness measures from outside.
//!
//! # Stability Guarantee
//!
//! - `Engine` trait: STABLE since v0.1.0
//! - `Workload` / `CountRun`: fields won't be removed

use std::collections::HashMap;

use crate::counting::ClassCounts;

// =================================================================================================
// Workload (WHAT to Compute)
// =================================================================================================

/// A counting workload: classify every integer in `[0, upper_bound)`
///
/// The demos build this from a literal constant in source, exactly the
/// way the behavior of a one-shot harness is meant to be changed.
///
/// # Example
///
/// ```rust
/// use fizz_rs::counting::Workload;
///
/// let workload = Workload::new(100_000);
/// assert_eq!(workload.upper_bound, 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    /// Exclusive upper bound of the counted range
    pub upper_bound: u32,
}

impl Workload {
    /// Create a workload for `[0, upper_bound)`
    pub fn new(upper_bound: u32) -> Self {
        Self { upper_bound }
    }

    /// Expected counts for this workload (analytic, engine-independent)
    pub fn expected(&self) -> ClassCounts {
        ClassCounts::closed_form(self.upper_bound)
    }
}

// =================================================================================================
// Count Run (The Answer + Diagnostics)
// =================================================================================================

/// Result of one engine invocation
///
/// Carries the counts plus free-form metadata the engine wants to
/// surface (node counts, instruction counts, iteration counts). The
/// harness prints metadata alongside the timing so a reader can relate
/// overhead to machinery size.
#[derive(Debug, Clone)]
pub struct CountRun {
    /// The computed counts
    pub counts: ClassCounts,

    /// Engine-specific diagnostics
    pub metadata: HashMap<String, String>,
}

impl CountRun {
    /// Create a run result with empty metadata
    pub fn new(counts: ClassCounts) -> Self {
        Self {
            counts,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Engine Trait
// =================================================================================================

/// Trait for counting execution engines
///
/// # Responsibility
///
/// Computes the class counts for a workload. Does NOT time itself
/// (that's the harness's job) and does NOT print.
///
/// # Mandatory Point
///
/// Every engine MUST produce counts identical to
/// [`ClassCounts::closed_form`] for every workload. An engine that
/// disagrees with the closed form is wrong, full stop; the engines
/// exist to compare overhead, not results.
pub trait Engine {
    /// Compute the counts for the given workload
    ///
    /// # Errors
    ///
    /// Returns `Err` when the engine's internal machinery is broken
    /// (malformed graph, out-of-range register). Engines have no input
    /// failure modes: every `Workload` is valid.
    fn count(&self, workload: &Workload) -> Result<CountRun, String>;

    /// Name of the engine (used for display and report labels)
    fn name(&self) -> &str;

    /// Description of the engine (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEngine {
        counts: ClassCounts,
    }

    impl Engine for FixedEngine {
        fn count(&self, _workload: &Workload) -> Result<CountRun, String> {
            Ok(CountRun::new(self.counts))
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    #[test]
    fn test_workload_expected() {
        let workload = Workload::new(12);
        assert_eq!(workload.expected(), ClassCounts::new(4, 2, 2));
    }

    #[test]
    fn test_count_run_metadata() {
        let mut run = CountRun::new(ClassCounts::zeros());
        run.add_metadata("nodes", "17");

        assert_eq!(run.metadata.get("nodes"), Some(&"17".to_string()));
        assert_eq!(run.counts, ClassCounts::zeros());
    }

    #[test]
    fn test_engine_object_safety() {
        // Engines are used behind &dyn in the harness and benches
        let engine = FixedEngine {
            counts: ClassCounts::new(1, 2, 3),
        };
        let dynamic: &dyn Engine = &engine;

        let run = dynamic.count(&Workload::new(10)).unwrap();
        assert_eq!(run.counts, ClassCounts::new(1, 2, 3));
        assert_eq!(dynamic.name(), "Fixed");
        assert!(dynamic.description().is_none());
    }
}
