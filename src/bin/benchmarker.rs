extern crate atomic_cost_benchmarker;

use atomic_cost_benchmarker::calibrate::Calibration;
use atomic_cost_benchmarker::config;
use atomic_cost_benchmarker::measure::{time_atomic, time_contended, time_plain};
use atomic_cost_benchmarker::report::Comparison;
use atomic_cost_benchmarker::utils;

fn main() {

    // Args extract
    let args = config::parse_config();
    utils::setup_tracing();

    // Find a count lasting about the target, unless one was given
    let calibration = match args.limit {
        Some(limit) => {
            let plain = time_plain(limit).duration();
            println!(
                "Count: {} took {} seconds for ordinary counting.",
                limit,
                plain.as_secs_f64()
            );
            Calibration { limit, plain, attempts: 1 }
        }
        None => args.calibrator().find_appropriate_limit(),
    };
    tracing::info!(limit = calibration.limit, attempts = calibration.attempts, "calibrated");

    // Same count, now atomic, then contended by a second thread
    let atomic = time_atomic(calibration.limit).duration();
    let contended = time_contended(calibration.limit).duration();

    utils::print_summary(&Comparison {
        limit: calibration.limit,
        plain: calibration.plain,
        atomic,
        contended,
    });
}
