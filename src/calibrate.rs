//! Search for the iteration count that makes a plain count last about
//! `target`.
//!
//! Runs shorter than [`TINY`] are multiplied by 100, runs shorter than
//! [`SMALL`] are doubled. Everything else outside the acceptance band is
//! rescaled linearly towards the target. There is no attempt cap: a workload
//! whose cost doesn't grow with the count will keep the search spinning.

use std::time::Duration;

use crate::measure::time_plain;

pub const DEFAULT_INITIAL: u64 = 65_536;
pub const DEFAULT_TARGET: Duration = Duration::from_millis(200);
pub const DEFAULT_TOLERANCE: Duration = Duration::from_millis(2);

/// Below this the count jumps by 100x.
pub const TINY: Duration = Duration::from_millis(1);
/// Below this the count doubles.
pub const SMALL: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Jump,
    Double,
    Accept,
    Rescale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub limit: u64,
    pub plain: Duration,
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Calibrator {
    pub initial: u64,
    pub target: Duration,
    pub tolerance: Duration,
}

impl Default for Calibrator {
    fn default() -> Self {
        Calibrator {
            initial: DEFAULT_INITIAL,
            target: DEFAULT_TARGET,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Calibrator {
    /// Decide what to do with a run that took `elapsed`.
    ///
    /// The band is open: landing exactly on `target ± tolerance` rescales.
    pub fn classify(&self, elapsed: Duration) -> Adjustment {
        if elapsed < TINY {
            Adjustment::Jump
        } else if elapsed < SMALL {
            Adjustment::Double
        } else if elapsed > self.target.saturating_sub(self.tolerance)
            && elapsed < self.target.saturating_add(self.tolerance)
        {
            Adjustment::Accept
        } else {
            Adjustment::Rescale
        }
    }

    /// Next count to try after `limit` took `elapsed`, or `None` once accepted.
    pub fn adjust(&self, limit: u64, elapsed: Duration) -> Option<u64> {
        let next = match self.classify(elapsed) {
            Adjustment::Accept => return None,
            Adjustment::Jump => limit.saturating_mul(100),
            Adjustment::Double => limit.saturating_mul(2),
            Adjustment::Rescale => {
                let scaled = u128::from(limit).saturating_mul(self.target.as_nanos())
                    / elapsed.as_nanos().max(1);
                if scaled > u128::from(u64::MAX) {
                    u64::MAX
                } else {
                    scaled as u64
                }
            }
        };
        Some(next.max(1))
    }

    /// Time the real plain workload until a count lands in the band.
    pub fn find_appropriate_limit(&self) -> Calibration {
        self.find_limit_with(|limit| time_plain(limit).duration())
    }

    /// Same search, with `measure` standing in for the clock.
    pub fn find_limit_with<M>(&self, mut measure: M) -> Calibration
    where
        M: FnMut(u64) -> Duration,
    {
        let mut limit = self.initial.max(1);
        let mut attempts = 0u32;
        loop {
            let elapsed = measure(limit);
            attempts += 1;
            println!(
                "Count: {} took {} seconds for ordinary counting.",
                limit,
                elapsed.as_secs_f64()
            );
            match self.adjust(limit, elapsed) {
                None => {
                    tracing::debug!(limit, attempts, "calibration accepted");
                    return Calibration {
                        limit,
                        plain: elapsed,
                        attempts,
                    };
                }
                Some(next) => {
                    tracing::debug!(
                        limit,
                        next,
                        elapsed_ms = elapsed.as_secs_f64() * 1e3,
                        adjustment = ?self.classify(elapsed),
                        "calibration step"
                    );
                    limit = next;
                }
            }
        }
    }
}
