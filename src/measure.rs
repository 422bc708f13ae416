// Timing runs. Each one owns a fresh counter and a fresh timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crate::timer::{Interval, SyncTimer};
use crate::workload::{count_atomic, count_plain};

/// Time an unsynchronized count to `limit` on the calling thread.
pub fn time_plain(limit: u64) -> Interval {
    let timer = SyncTimer::new(1);
    let mut counter = 0u64;
    timer.run(|| count_plain(&mut counter, limit));
    let interval = timer.into_interval();
    tracing::debug!(limit, counter, secs = interval.as_secs_f64(), "plain run");
    interval
}

/// Time an atomic count to `limit` on the calling thread.
pub fn time_atomic(limit: u64) -> Interval {
    let timer = SyncTimer::new(1);
    let counter = AtomicU64::new(0);
    timer.run(|| count_atomic(&counter, limit));
    let interval = timer.into_interval();
    tracing::debug!(
        limit,
        counter = counter.load(Ordering::SeqCst),
        secs = interval.as_secs_f64(),
        "atomic run"
    );
    interval
}

/// Time two threads counting the same atomic up to `limit`.
///
/// The calling thread is one of the two participants. A panic in the helper
/// thread is re-raised here when the scope joins it.
pub fn time_contended(limit: u64) -> Interval {
    let timer = SyncTimer::new(2);
    let counter = AtomicU64::new(0);

    thread::scope(|s| {
        s.spawn(|| timer.run(|| count_atomic(&counter, limit)));
        timer.run(|| count_atomic(&counter, limit));
    });

    let interval = timer.into_interval();
    tracing::debug!(
        limit,
        counter = counter.load(Ordering::SeqCst),
        secs = interval.as_secs_f64(),
        "contended run"
    );
    interval
}
