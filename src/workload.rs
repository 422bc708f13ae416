// Counting loops that get timed.

use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};

/// Increments `counter` without synchronization until it reaches `limit`.
///
/// Single writer only. The counter goes through `black_box` on every step so
/// the loop can't be folded into a single add.
pub fn count_plain(counter: &mut u64, limit: u64) {
    loop {
        let next = black_box(*counter) + 1;
        *counter = next;
        if next >= limit {
            break;
        }
    }
}

/// Increments `counter` with `SeqCst` read-modify-writes until an increment
/// yields a value of at least `limit`.
///
/// Safe to run from several threads on the same counter. Each caller stops
/// on its own first increment that reaches the limit, so with contention the
/// final value may overshoot `limit` by up to one per extra participant.
pub fn count_atomic(counter: &AtomicU64, limit: u64) {
    while counter.fetch_add(1, Ordering::SeqCst) + 1 < limit {}
}
