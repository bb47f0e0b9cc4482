//! Common utilities for integration tests

pub mod oracle;

// Re-export commonly used items
pub use oracle::{brute_force_counts, WORKLOAD_SIZES};
