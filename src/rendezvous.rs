//! Reusable barrier that runs a completion action once per phase.
//!
//! Behaves like `std::sync::Barrier`, except that the participant completing
//! a phase runs the action before anyone is released. Waiters therefore never
//! observe a phase as done before its action has run.

use std::sync::{Condvar, Mutex, PoisonError};

/// Action run by the participant that completes a phase.
pub trait Completion {
    fn complete(&mut self);
}

impl<F: FnMut()> Completion for F {
    fn complete(&mut self) {
        self()
    }
}

struct State<F> {
    arrived: usize,
    generation: u64,
    on_complete: F,
}

pub struct Rendezvous<F> {
    parties: usize,
    state: Mutex<State<F>>,
    released: Condvar,
}

impl<F: Completion> Rendezvous<F> {
    /// Build a barrier for `parties` participants. Zero is treated as one.
    pub fn new(parties: usize, on_complete: F) -> Self {
        Rendezvous {
            parties: parties.max(1),
            state: Mutex::new(State {
                arrived: 0,
                generation: 0,
                on_complete,
            }),
            released: Condvar::new(),
        }
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Block until every participant of the current phase has arrived.
    ///
    /// Returns `true` on exactly one caller per phase: the one whose arrival
    /// completed it and ran the completion action.
    pub fn arrive_and_wait(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = state.generation;
        state.arrived += 1;

        if state.arrived == self.parties {
            state.on_complete.complete();
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            return true;
        }

        while state.generation == generation {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        false
    }

    /// Hand back the completion action once no participant needs the barrier.
    pub fn into_action(self) -> F {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .on_complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn single_party_fires_on_every_arrival() {
        let mut fired = 0;
        let rendezvous = Rendezvous::new(1, || fired += 1);
        assert!(rendezvous.arrive_and_wait());
        assert!(rendezvous.arrive_and_wait());
        drop(rendezvous);
        assert_eq!(fired, 2);
    }

    #[test]
    fn zero_parties_behaves_like_one() {
        let rendezvous = Rendezvous::new(0, || {});
        assert_eq!(rendezvous.parties(), 1);
        assert!(rendezvous.arrive_and_wait());
    }

    #[test]
    fn two_parties_fire_once_per_phase() {
        let fired = AtomicUsize::new(0);
        let rendezvous = Rendezvous::new(2, || {
            fired.fetch_add(1, Ordering::SeqCst);
        });
        let leaders = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..2 {
                s.spawn(|| {
                    for _ in 0..100 {
                        if rendezvous.arrive_and_wait() {
                            leaders.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                });
            }
        });

        assert_eq!(fired.load(Ordering::SeqCst), 100);
        assert_eq!(leaders.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn action_runs_before_release() {
        let phase = AtomicUsize::new(0);
        let rendezvous = Rendezvous::new(2, || {
            phase.fetch_add(1, Ordering::SeqCst);
        });

        thread::scope(|s| {
            for _ in 0..2 {
                s.spawn(|| {
                    for expected in 1..=50 {
                        rendezvous.arrive_and_wait();
                        assert!(phase.load(Ordering::SeqCst) >= expected);
                    }
                });
            }
        });
    }
}
