//! Start/finish capture around a workload shared by one or two threads.

use std::time::{Duration, Instant};

use crate::rendezvous::{Completion, Rendezvous};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingStart,
    AwaitingFinish,
}

/// Two-state timestamp recorder.
///
/// The first capture writes the start slot, every later one the finish slot.
#[derive(Debug, Clone)]
pub struct TimeCapture {
    phase: Phase,
    start: Instant,
    finish: Instant,
    starts: u32,
    finishes: u32,
}

impl TimeCapture {
    pub fn new() -> Self {
        let now = Instant::now();
        TimeCapture {
            phase: Phase::AwaitingStart,
            start: now,
            finish: now,
            starts: 0,
            finishes: 0,
        }
    }

    pub fn capture(&mut self) {
        let now = Instant::now();
        match self.phase {
            Phase::AwaitingStart => {
                self.start = now;
                self.starts += 1;
                self.phase = Phase::AwaitingFinish;
            }
            Phase::AwaitingFinish => {
                self.finish = now;
                self.finishes += 1;
            }
        }
    }

    /// Number of (start, finish) captures recorded so far.
    pub fn counts(&self) -> (u32, u32) {
        (self.starts, self.finishes)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            finish: self.finish,
        }
    }
}

impl Completion for TimeCapture {
    fn complete(&mut self) {
        self.capture()
    }
}

impl Default for TimeCapture {
    fn default() -> Self {
        TimeCapture::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: Instant,
    pub finish: Instant,
}

impl Interval {
    pub fn duration(&self) -> Duration {
        self.finish.saturating_duration_since(self.start)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.duration().as_secs_f64()
    }
}

/// Barrier-synchronized timer.
///
/// Every participant calls [`SyncTimer::run`] with its own copy of the
/// workload. The clock starts when the last participant reaches the first
/// rendezvous and stops when the last one reaches the second, so neither
/// startup nor teardown skew leaks into the interval.
pub struct SyncTimer {
    rendezvous: Rendezvous<TimeCapture>,
}

impl SyncTimer {
    pub fn new(parties: usize) -> Self {
        SyncTimer {
            rendezvous: Rendezvous::new(parties, TimeCapture::new()),
        }
    }

    pub fn parties(&self) -> usize {
        self.rendezvous.parties()
    }

    /// Rendezvous, run `work`, rendezvous again.
    pub fn run<W, T>(&self, work: W) -> T
    where
        W: FnOnce() -> T,
    {
        self.rendezvous.arrive_and_wait();
        let out = work();
        self.rendezvous.arrive_and_wait();
        out
    }

    /// Consume the timer once every participant has left [`SyncTimer::run`].
    pub fn into_capture(self) -> TimeCapture {
        self.rendezvous.into_action()
    }

    pub fn into_interval(self) -> Interval {
        self.into_capture().interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;

    #[test]
    fn capture_moves_from_start_to_finish() {
        let mut capture = TimeCapture::new();
        assert_eq!(capture.phase(), Phase::AwaitingStart);
        assert_eq!(capture.counts(), (0, 0));
        capture.capture();
        assert_eq!(capture.phase(), Phase::AwaitingFinish);
        let first = capture.interval();
        assert!(first.finish <= first.start);

        capture.capture();
        let second = capture.interval();
        assert_eq!(second.start, first.start);
        assert!(second.finish >= second.start);

        capture.capture();
        let third = capture.interval();
        assert_eq!(third.start, first.start);
        assert!(third.finish >= second.finish);
        assert_eq!(capture.counts(), (1, 2));
    }

    #[test]
    fn single_party_brackets_workload() {
        let timer = SyncTimer::new(1);
        let mut inside = None;
        timer.run(|| {
            inside = Some(Instant::now());
        });
        let interval = timer.into_interval();
        let inside = inside.unwrap();
        assert!(interval.start <= inside);
        assert!(inside <= interval.finish);
    }

    #[test]
    fn single_party_captures_once_each() {
        let timer = SyncTimer::new(1);
        let before = Instant::now();
        timer.run(|| {});
        let after = Instant::now();
        let capture = timer.into_capture();
        assert_eq!(capture.counts(), (1, 1));
        assert_eq!(capture.phase(), Phase::AwaitingFinish);
        let interval = capture.interval();
        assert!(before <= interval.start);
        assert!(interval.start <= interval.finish);
        assert!(interval.finish <= after);
    }

    #[test]
    fn run_returns_workload_output() {
        let timer = SyncTimer::new(1);
        assert_eq!(timer.run(|| 41 + 1), 42);
    }

    #[test]
    fn two_parties_bracket_both_workloads() {
        struct Marks {
            ready: Instant,
            first: Instant,
            last: Instant,
            left: Instant,
        }

        let timer = SyncTimer::new(2);
        assert_eq!(timer.parties(), 2);
        let marks = Mutex::new(Vec::new());

        thread::scope(|s| {
            for _ in 0..2 {
                s.spawn(|| {
                    let ready = Instant::now();
                    let (first, last) = timer.run(|| {
                        let first = Instant::now();
                        thread::sleep(std::time::Duration::from_millis(5));
                        (first, Instant::now())
                    });
                    let left = Instant::now();
                    marks.lock().unwrap().push(Marks {
                        ready,
                        first,
                        last,
                        left,
                    });
                });
            }
        });

        let capture = timer.into_capture();
        assert_eq!(capture.counts(), (1, 1));
        let interval = capture.interval();
        let marks = marks.into_inner().unwrap();
        assert_eq!(marks.len(), 2);
        for m in &marks {
            assert!(m.ready <= interval.start);
            assert!(interval.start <= m.first);
            assert!(m.last <= interval.finish);
            assert!(interval.finish <= m.left);
        }
        assert!(interval.duration() >= std::time::Duration::from_millis(5));
    }

    #[test]
    fn interval_seconds_match_duration() {
        let start = Instant::now();
        let interval = Interval {
            start,
            finish: start + std::time::Duration::from_millis(1500),
        };
        assert!((interval.as_secs_f64() - 1.5).abs() < 1e-9);
    }
}
