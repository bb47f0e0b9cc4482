//! Counting rule and engine contract
//!
//! This module provides the data model and the contract shared by every
//! execution engine.
//!
//! # Core Concepts
//!
//! - **Class / classify**: the precedence rule (`%6 > %3 > %2`)
//! - **ClassCounts**: the 3-tuple of counts, with an analytic closed form
//! - **Workload**: WHAT to compute (the upper bound)
//! - **Engine**: HOW it is computed (one implementation per backend)
//!
//! # Architecture
//!
//! The rule is **separate from the engines**:
//! - this module provides the **rule** (what a correct answer is)
//! - the [`crate::engines`] module provides the **machinery** whose
//!   call overhead is being compared
//!
//! This separation allows the same workload to run through every engine
//! and the results to be checked against one oracle.
//!
//! # Example
//!
//! ```rust
//! use fizz_rs::counting::{Engine, Workload};
//! use fizz_rs::engines::ScalarEngine;
//!
//! let workload = Workload::new(12);
//! let run = ScalarEngine::new().count(&workload).unwrap();
//!
//! assert_eq!(run.counts, workload.expected());
//! ```

// module declaration
pub mod counts;
pub mod traits;

// re-export commonly used types for convenience
pub use counts::{classify, Class, ClassCounts};
pub use traits::{CountRun, Engine, Workload};
