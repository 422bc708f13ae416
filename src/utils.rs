// Util functions for benchmarkers

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::report::Comparison;

/// Install a stderr subscriber filtered by `RUST_LOG`, `warn` when unset.
///
/// Stdout is kept for results only.
pub fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing subscriber already installed");
    }
}

/// Nicely outputs the comparison between the three runs.
pub fn print_summary(comparison: &Comparison) {
    print_line();
    println!("{}", comparison);
    print_line();
}

/// Prints dashed line
pub fn print_line() {
    println!("\n-------------------------------------------------------------\n");
}
