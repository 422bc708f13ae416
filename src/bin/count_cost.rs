extern crate atomic_cost_benchmarker;

use atomic_cost_benchmarker::config;
use atomic_cost_benchmarker::measure::{time_atomic, time_contended};
use atomic_cost_benchmarker::utils;

/// 2^32 - 2^16 with a digit lost, kept as the historical default.
const FIXED_LIMIT: u64 = 429_490_176;

fn main() {

    let args = config::parse_count_config();
    utils::setup_tracing();

    let limit = args.limit.unwrap_or(FIXED_LIMIT);
    let interval = if args.contended {
        time_contended(limit)
    } else {
        time_atomic(limit)
    };
    println!("Count took {} seconds to finish.", interval.as_secs_f64());
}
