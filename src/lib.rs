//! fizz-rs: FizzBuzz Engine Comparison Framework
//!
//! A micro-benchmark framework measuring the execution-time overhead of
//! different execution strategies on one deliberately trivial workload:
//! counting FizzBuzz classes over a range of integers.
//!
//! # Architecture
//!
//! fizz-rs is built on two core principles:
//!
//! 1. **Separation of Workload and Engine**
//!    - The workload defines what to count (one shared semantics)
//!    - Engines define how to count it (scalar, vectorized, traced,
//!      compiled)
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design for adding engines
//!    - One shared oracle: every engine must agree with the closed-form
//!      counts
//!
//! # Quick Start
//!
//! ```rust
//! use fizz_rs::counting::{ClassCounts, Engine, Workload};
//! use fizz_rs::engines::ScalarEngine;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Define the workload
//! let workload = Workload::new(100_000);
//!
//! // 2. Run an engine
//! let run = ScalarEngine.count(&workload)?;
//!
//! // 3. Check against the closed form
//! assert_eq!(run.counts, ClassCounts::closed_form(100_000));
//! println!("Result: {}", run.counts);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`counting`]: Workload definition and the engine trait
//! - [`engines`]: Execution engines (scalar, vectorized, traced graph,
//!   compiled tape) and model artifacts
//! - [`cross`]: Sparse cross-feature scoring
//! - [`timing`]: Wall-clock measurement helpers
//! - [`output`]: Report visualization and export

// Core modules
pub mod counting;

pub mod cross;
pub mod engines;
pub mod output;
pub mod timing;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use fizz_rs::prelude::*;
    //! ```
    pub use crate::counting::{classify,
                              Class,
                              ClassCounts,
                              CountRun,
                              Engine,
                              Workload};
    pub use crate::engines::{GraphEngine,
                             ProgramEngine,
                             ScalarEngine,
                             TracedModel,
                             VectorizedEngine};
    pub use crate::timing::{Measurement, OverheadReport};
}
