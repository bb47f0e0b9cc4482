//! Reference oracle for engine equivalence tests
//!
//! A deliberately naive counting implementation, written independently
//! of the library's classification helpers, so engine bugs and oracle
//! bugs cannot cancel out.

use fizz_rs::counting::ClassCounts;

/// Workload sizes shared by the equivalence suites
///
/// Covers the degenerate bounds (0, 1), each first multiple, one full
/// period of 6, the worked example of 12, and a few larger sizes where
/// the parallel threshold machinery can kick in.
pub const WORKLOAD_SIZES: [u32; 10] = [0, 1, 2, 3, 6, 7, 12, 100, 1_000, 100_003];

/// Count classes over `[0, n)` with a plain if-chain
///
/// Divisibility by 6 wins, then 3, then 2, matching the precedence
/// every engine must honor.
pub fn brute_force_counts(n: u32) -> ClassCounts {
    let mut fizz = 0_u64;
    let mut buzz = 0_u64;
    let mut fizzbuzz = 0_u64;

    for i in 0..n {
        if i % 6 == 0 {
            fizzbuzz += 1;
        } else if i % 3 == 0 {
            buzz += 1;
        } else if i % 2 == 0 {
            fizz += 1;
        }
    }

    ClassCounts {
        fizz,
        buzz,
        fizzbuzz,
    }
}
