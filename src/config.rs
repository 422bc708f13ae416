use std::ffi::OsString;
use std::time::Duration;

use clap::{App, Arg, ArgMatches, Error, ErrorKind};

use crate::calibrate::{self, Calibrator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub initial: u64,
    pub target: Duration,
    pub tolerance: Duration,
    pub limit: Option<u64>,
    pub contended: bool,
}

impl Config {
    pub fn calibrator(&self) -> Calibrator {
        Calibrator {
            initial: self.initial,
            target: self.target,
            tolerance: self.tolerance,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial: calibrate::DEFAULT_INITIAL,
            target: calibrate::DEFAULT_TARGET,
            tolerance: calibrate::DEFAULT_TOLERANCE,
            limit: None,
            contended: false,
        }
    }
}

fn app(name: &'static str) -> App<'static, 'static> {
    App::new(name)
        .arg(Arg::with_name("initial")
            .short("i")
            .long("initial")
            .value_name("initial")
            .help("iteration count the calibration starts from")
            .takes_value(true)
            .default_value("65536")
        )
        .arg(Arg::with_name("target")
            .short("t")
            .long("target-ms")
            .value_name("target")
            .help("duration in ms a calibrated plain count should take")
            .takes_value(true)
            .default_value("200")
        )
        .arg(Arg::with_name("tolerance")
            .short("w")
            .long("tolerance-ms")
            .value_name("tolerance")
            .help("accepted distance in ms from the target, exclusive")
            .takes_value(true)
            .default_value("2")
        )
        .arg(Arg::with_name("limit")
            .short("l")
            .long("limit")
            .value_name("limit")
            .help("iteration count to use as is, skips calibration")
            .takes_value(true)
        )
}

fn count_app() -> App<'static, 'static> {
    app("count_cost")
        .arg(Arg::with_name("contended")
            .short("c")
            .long("contended")
            .help("count with two threads on the same counter")
        )
}

/// Extract the configuration from Command line
pub fn parse_config() -> Config {
    parse_config_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

/// Same as [`parse_config`], also accepting `--contended`.
pub fn parse_count_config() -> Config {
    parse_count_config_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

pub fn parse_config_from<I, T>(args: I) -> Result<Config, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    config_from(&app("benchmarker").get_matches_from_safe(args)?)
}

pub fn parse_count_config_from<I, T>(args: I) -> Result<Config, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    config_from(&count_app().get_matches_from_safe(args)?)
}

fn config_from(matches: &ArgMatches) -> Result<Config, Error> {
    let initial = number(matches, "initial")?;
    let target = Duration::from_millis(number(matches, "target")?);
    let tolerance = Duration::from_millis(number(matches, "tolerance")?);
    let limit = match matches.value_of("limit") {
        Some(_) => Some(number(matches, "limit")?),
        None => None,
    };

    if initial == 0 {
        return Err(invalid("initial must be at least 1"));
    }
    // Below the doubling threshold the band could never be reached.
    if target < calibrate::SMALL {
        return Err(invalid("target-ms must be at least 5"));
    }
    // Zero leaves an empty open band and calibration would never accept.
    if tolerance == Duration::from_millis(0) {
        return Err(invalid("tolerance-ms must be at least 1"));
    }
    if tolerance >= target {
        return Err(invalid("tolerance-ms must be smaller than target-ms"));
    }

    Ok(Config {
        initial,
        target,
        tolerance,
        limit,
        contended: matches.is_present("contended"),
    })
}

fn number(matches: &ArgMatches, name: &str) -> Result<u64, Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    raw.parse::<u64>()
        .map_err(|e| invalid(&format!("invalid value '{}' for {}: {}", raw, name, e)))
}

fn invalid(description: &str) -> Error {
    Error::with_description(description, ErrorKind::InvalidValue)
}
