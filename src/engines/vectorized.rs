//! Array-based vectorized engine
//!
//! # Background
//!
//! Instead of branching per integer, this engine materializes the range
//! as a vector and reduces three divisibility masks:
//!
//! ```text
//! x        = [0, 1, 2, ..., n-1]
//! sixes    = Σ (x % 6 == 0)
//! threes   = Σ (x % 3 == 0)
//! twos     = Σ (x % 2 == 0)
//!
//! fizzbuzz = sixes
//! buzz     = threes - sixes     (multiples of 3 that are not of 6)
//! fizz     = twos   - sixes     (multiples of 2 that are not of 6)
//! ```
//!
//! The subtraction is valid because every integer divisible by both 2
//! and 3 is divisible by 6, so the overlap removed from each mask is
//! exactly the fizzbuzz set.
//!
//! # Characteristics
//!
//! - **Dispatch**: one pass per mask, no per-element branching on class
//! - **Allocation**: one `n`-element vector per call
//! - **Parallelism**: mask reduction switches to Rayon above the
//!   runtime threshold (see [`crate::engines::parallel_threshold`]);
//!   only when compiled with the `parallel` feature

use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::counting::{ClassCounts, CountRun, Engine, Workload};
use crate::engines::parallel_threshold;

// =================================================================================================
// Vectorized Engine
// =================================================================================================

/// Mask-reduction engine over an nalgebra vector
///
/// # Example
///
/// ```rust
/// use fizz_rs::counting::{Engine, Workload};
/// use fizz_rs::engines::VectorizedEngine;
///
/// let run = VectorizedEngine::new().count(&Workload::new(12)).unwrap();
/// assert_eq!(run.counts.fizz, 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorizedEngine;

impl VectorizedEngine {
    /// Create a new vectorized engine
    pub fn new() -> Self {
        Self
    }

    /// Sum of `x % k == 0` over the materialized range
    fn mask_sum(x: &DVector<i64>, k: i64) -> u64 {
        let values = x.as_slice();

        if values.len() > parallel_threshold() {
            #[cfg(feature = "parallel")]
            return values.par_iter().filter(|v| *v % k == 0).count() as u64;
        }

        values.iter().filter(|v| *v % k == 0).count() as u64
    }
}

impl Engine for VectorizedEngine {
    fn count(&self, workload: &Workload) -> Result<CountRun, String> {
        let n = workload.upper_bound as usize;

        // ====== Step 1: Materialize the range ======

        // Force everything through a real vector for an even comparison
        // with the other array-based engines, even though the masks
        // could be computed from the index alone.
        let x: DVector<i64> = DVector::from_iterator(n, (0..n).map(|i| i as i64));

        // ====== Step 2: Reduce the masks ======

        let sixes = Self::mask_sum(&x, 6);
        let threes = Self::mask_sum(&x, 3);
        let twos = Self::mask_sum(&x, 2);

        // ====== Step 3: Resolve precedence by subtraction ======

        let counts = ClassCounts::new(twos - sixes, threes - sixes, sixes);

        let mut run = CountRun::new(counts);
        run.add_metadata("engine", self.name());
        run.add_metadata("vector_len", &n.to_string());
        run.add_metadata(
            "parallel",
            if cfg!(feature = "parallel") && n > parallel_threshold() {
                "yes"
            } else {
                "no"
            },
        );

        Ok(run)
    }

    fn name(&self) -> &str {
        "Vectorized Masks"
    }

    fn description(&self) -> Option<&str> {
        Some("Arange vector + three divisibility masks, reduced by summation")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
