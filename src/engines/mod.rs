//! Execution engines
//!
//! Each engine computes the same [`crate::counting::ClassCounts`]
//! through different machinery; the point of the crate is measuring the
//! overhead that machinery adds, not any algorithmic benefit.
//!
//! # Module Organization
//!
//! - **`scalar`**: plain interpreted loop (the baseline)
//! - **`vectorized`**: arange + divisibility masks over an nalgebra
//!   vector, with an optional Rayon path for large workloads
//! - **`graph`**: traced expression-graph IR, interpreted node by node
//! - **`program`**: the traced graph lowered to a flat register tape
//!   at construction time, then executed
//! - **`artifact`**: save/load of traced models, plus the static-trace
//!   export that rejects looped models
//!
//! # Overhead Ladder
//!
//! The engines form a deliberate ladder of indirection:
//!
//! ```text
//! scalar      direct branches, no machinery
//! vectorized  one pass per mask over a materialized vector
//! program     one dispatch per instruction per iteration
//! graph       one dispatch per node per iteration, fresh value
//!             buffer each evaluation
//! ```
//!
//! A graph evaluation re-resolves every node every iteration; the
//! compiled tape resolves them once. Comparing the two is the
//! interpreted-vs-jit measurement the demos print.

// =================================================================================================
// Module Declarations
// =================================================================================================
pub mod artifact;
pub mod graph;
pub mod program;
pub mod scalar;
pub mod vectorized;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand mask summation off to Rayon is an execution
// concern, not part of the counting rule. It therefore lives here
// (engines) rather than in counting/counts.rs.
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (useful in benchmarks and tests) without requiring a mutex on
// every count() call. Relaxed ordering is sufficient: the value is a
// performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of elements above which [`vectorized::VectorizedEngine`]
/// switches to parallel mask summation.
///
/// The crossover is set just below 100 000 elements. Below that point the
/// overhead of Rayon's thread-pool dispatch outweighs the per-element
/// work of a three-way divisibility test.
const DEFAULT_PARALLEL_THRESHOLD: usize = 99_999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The vectorized engine uses sequential mask summation when the
/// workload contains fewer elements than this value, and switches to
/// Rayon when it contains more — but only when the crate is compiled
/// with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use fizz_rs::engines::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`. A zero-element threshold would force
/// parallel dispatch on every single-element workload, which is never
/// the intended behaviour.
///
/// # Example
///
/// ```rust
/// use fizz_rs::engines::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and
/// restores it on drop.
///
/// Only compiled in test builds. Prevents one test from leaking a
/// modified threshold value into the next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring to any value never
        // panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use artifact::{export_static_trace, load_model, save_model};
pub use graph::{trace_counting_model, Graph, GraphEngine, Op, TracedModel};
pub use program::{Instr, Program, ProgramEngine};
pub use scalar::ScalarEngine;
pub use vectorized::VectorizedEngine;

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 99_999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let before = parallel_threshold();
        {
            let _guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
        }
        // Guard dropped — value must be back to what it was before.
        assert_eq!(parallel_threshold(), before);
    }
}
