// Derived comparison of the plain, atomic and contended runs.

use std::fmt;
use std::time::Duration;

/// Results of the three runs at one iteration count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub limit: u64,
    pub plain: Duration,
    pub atomic: Duration,
    pub contended: Duration,
}

impl Comparison {
    /// How many times slower the atomic count is than the plain one.
    pub fn atomic_ratio(&self) -> f64 {
        ratio(self.atomic, self.plain)
    }

    /// Same, for the two-thread count against the single-thread atomic one.
    pub fn contention_ratio(&self) -> f64 {
        ratio(self.contended, self.atomic)
    }
}

pub fn ratio(numerator: Duration, denominator: Duration) -> f64 {
    numerator.as_secs_f64() / denominator.as_secs_f64()
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Count: {} took {} seconds for atomic counting.",
            self.limit,
            self.atomic.as_secs_f64()
        )?;
        writeln!(
            f,
            "Atomic counting is {:.3} times slower than ordinary counting.",
            self.atomic_ratio()
        )?;
        write!(
            f,
            "Count: {} took {} seconds for atomic counting with two threads ({:.3}x single-thread atomic).",
            self.limit,
            self.contended.as_secs_f64(),
            self.contention_ratio()
        )
    }
}
