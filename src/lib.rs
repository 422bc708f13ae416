//! Measures what atomic increments cost compared to plain ones, alone and
//! with two threads hammering the same counter.
//!
//! The iteration count is calibrated first so that a plain count lasts about
//! 200ms on the host, then the same count is reused for every other run.

pub mod calibrate;
pub mod config;
pub mod measure;
pub mod rendezvous;
pub mod report;
pub mod timer;
pub mod utils;
pub mod workload;
