//! Counting data types
//!
//! This module is the single source of truth for the classification rule
//! that every execution engine re-implements in its own idiom:
//!
//! ```text
//! for i in [0, n):
//!     if      i % 6 == 0  ->  fizzbuzz += 1
//!     else if i % 3 == 0  ->  buzz     += 1
//!     else if i % 2 == 0  ->  fizz     += 1
//! ```
//!
//! The precedence matters: a multiple of 6 is counted once, as fizzbuzz,
//! never as buzz or fizz.

use std::fmt;

// =================================================================================================
// Classification (Type-safe Rule)
// =================================================================================================

/// Classification of a single integer under the precedence rule
///
/// Exactly one variant applies to any integer. `None` covers odd
/// non-multiples-of-3 (1, 5, 7, 11, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// Multiple of 6
    FizzBuzz,

    /// Multiple of 3 that is not a multiple of 6
    Buzz,

    /// Multiple of 2 that is not a multiple of 6
    Fizz,

    /// Everything else
    None,
}

/// Classify a single integer
///
/// This is the reference implementation of the rule. Engines that unroll
/// or re-express the rule (masks, graph nodes, instruction tapes) are
/// tested against it.
///
/// # Example
///
/// ```rust
/// use fizz_rs::counting::{classify, Class};
///
/// assert_eq!(classify(0), Class::FizzBuzz);
/// assert_eq!(classify(3), Class::Buzz);
/// assert_eq!(classify(4), Class::Fizz);
/// assert_eq!(classify(7), Class::None);
/// ```
pub fn classify(i: u32) -> Class {
    if i % 6 == 0 {
        Class::FizzBuzz
    } else if i % 3 == 0 {
        Class::Buzz
    } else if i % 2 == 0 {
        Class::Fizz
    } else {
        Class::None
    }
}

// =================================================================================================
// Class Counts (The Only Entity)
// =================================================================================================

/// Counts of each class over a half-open range `[0, n)`
///
/// The three counters are the entire data model of this crate: every
/// engine produces one of these and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassCounts {
    /// Multiples of 2 that are not multiples of 6
    pub fizz: u64,

    /// Multiples of 3 that are not multiples of 6
    pub buzz: u64,

    /// Multiples of 6
    pub fizzbuzz: u64,
}

impl ClassCounts {
    /// Create counts from the three counters
    pub fn new(fizz: u64, buzz: u64, fizzbuzz: u64) -> Self {
        Self { fizz, buzz, fizzbuzz }
    }

    /// All-zero counts
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Record one classified integer
    pub fn record(&mut self, class: Class) {
        match class {
            Class::FizzBuzz => self.fizzbuzz += 1,
            Class::Buzz => self.buzz += 1,
            Class::Fizz => self.fizz += 1,
            Class::None => {}
        }
    }

    /// Total number of counted integers (excludes `Class::None`)
    pub fn total(&self) -> u64 {
        self.fizz + self.buzz + self.fizzbuzz
    }

    /// Analytic counts for `[0, n)`
    ///
    /// The number of multiples of `k` in `[0, n)` is `ceil(n / k)`
    /// because 0 is always a multiple. With the precedence rule:
    ///
    /// ```text
    /// fizzbuzz = ceil(n / 6)
    /// buzz     = ceil(n / 3) - ceil(n / 6)
    /// fizz     = ceil(n / 2) - ceil(n / 6)
    /// ```
    ///
    /// (Every integer divisible by both 2 and 3 is divisible by 6, so
    /// subtracting the fizzbuzz count removes exactly the overlap.)
    ///
    /// This closed form is the oracle every engine is tested against.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fizz_rs::counting::ClassCounts;
    ///
    /// // [0, 12): fizzbuzz {0, 6}, buzz {3, 9}, fizz {2, 4, 8, 10}
    /// assert_eq!(ClassCounts::closed_form(12), ClassCounts::new(4, 2, 2));
    /// ```
    pub fn closed_form(n: u32) -> Self {
        let multiples = |k: u64| -> u64 { (n as u64).div_ceil(k) };

        if n == 0 {
            return Self::zeros();
        }

        let six = multiples(6);
        Self {
            fizz: multiples(2) - six,
            buzz: multiples(3) - six,
            fizzbuzz: six,
        }
    }
}

impl std::ops::Add for ClassCounts {
    type Output = ClassCounts;

    fn add(self, rhs: Self) -> Self::Output {
        ClassCounts {
            fizz: self.fizz + rhs.fizz,
            buzz: self.buzz + rhs.buzz,
            fizzbuzz: self.fizzbuzz + rhs.fizzbuzz,
        }
    }
}

impl fmt::Display for ClassCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same order as the original scripts printed: [fizz, buzz, fizzbuzz]
        write!(f, "[{}, {}, {}]", self.fizz, self.buzz, self.fizzbuzz)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        // 6 is a multiple of 2, 3 and 6: must be FizzBuzz only
        assert_eq!(classify(6), Class::FizzBuzz);
        assert_eq!(classify(12), Class::FizzBuzz);

        assert_eq!(classify(3), Class::Buzz);
        assert_eq!(classify(9), Class::Buzz);

        assert_eq!(classify(2), Class::Fizz);
        assert_eq!(classify(10), Class::Fizz);

        assert_eq!(classify(1), Class::None);
        assert_eq!(classify(5), Class::None);
    }

    #[test]
    fn test_zero_is_fizzbuzz() {
        // 0 % k == 0 for every k: precedence makes it fizzbuzz
        assert_eq!(classify(0), Class::FizzBuzz);
    }

    #[test]
    fn test_record() {
        let mut counts = ClassCounts::zeros();
        counts.record(Class::FizzBuzz);
        counts.record(Class::Buzz);
        counts.record(Class::Fizz);
        counts.record(Class::None);

        assert_eq!(counts, ClassCounts::new(1, 1, 1));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_closed_form_twelve_integers() {
        // The worked example from the testable-properties section:
        // N = 12 -> fizzbuzz {0,6} = 2, buzz {3,9} = 2, fizz {2,4,8,10} = 4
        let counts = ClassCounts::closed_form(12);
        assert_eq!(counts.fizzbuzz, 2);
        assert_eq!(counts.buzz, 2);
        assert_eq!(counts.fizz, 4);
    }

    #[test]
    fn test_closed_form_empty_range() {
        assert_eq!(ClassCounts::closed_form(0), ClassCounts::zeros());
    }

    #[test]
    fn test_closed_form_matches_brute_force() {
        for n in [1_u32, 2, 5, 6, 7, 11, 12, 13, 100, 997] {
            let mut brute = ClassCounts::zeros();
            for i in 0..n {
                brute.record(classify(i));
            }
            assert_eq!(brute, ClassCounts::closed_form(n), "n = {}", n);
        }
    }

    #[test]
    fn test_partition_property() {
        // Counted + uncounted must partition the range: the uncounted
        // are exactly the odd non-multiples-of-3.
        for n in [0_u32, 1, 6, 12, 50, 1000] {
            let counts = ClassCounts::closed_form(n);
            let uncounted = (0..n).filter(|i| classify(*i) == Class::None).count() as u64;
            assert_eq!(counts.total() + uncounted, n as u64, "n = {}", n);
        }
    }

    #[test]
    fn test_addition() {
        let a = ClassCounts::new(1, 2, 3);
        let b = ClassCounts::new(10, 20, 30);
        assert_eq!(a + b, ClassCounts::new(11, 22, 33));
    }

    #[test]
    fn test_display_order() {
        // The originals printed [fizz, buzz, fizzbuzz]
        let counts = ClassCounts::new(4, 2, 2);
        assert_eq!(counts.to_string(), "[4, 2, 2]");
    }
}
