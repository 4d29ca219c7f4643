//! Command line plumbing for `sml-check`: argument parsing and the logger.
//!
//! Log records are prefixed with the time elapsed since launch so the cost of
//! each check configuration can be read off the debug output.

use std::time::SystemTime;

/// Parses the command line arguments and records the launch time.
pub fn parse_args<T: clap::Parser>(name: &str) -> (T, SystemTime) {
    let args = T::parse();
    let launch_time = SystemTime::now();
    log::info!(
        "{} launched at {} on {}.",
        name,
        chrono::DateTime::<chrono::Utc>::from(launch_time),
        std::env::consts::OS
    );
    (args, launch_time)
}

/// Initialises the logger with records of the form
/// `<seconds>.<millis> <LEVEL> [<crate>]: <message>`, where the time is
/// measured from `launch_time`.
///
/// `log_level` is the numeric level accepted by [`log_filter_from_level`].
pub fn setup_logging(launch_time: SystemTime, log_level: u8) {
    use std::io::Write;
    env_logger::builder()
        .format(move |buf, record| {
            let elapsed = launch_time.elapsed().unwrap_or_default();
            let target = record.target().split("::").next().unwrap_or("?");
            writeln!(
                buf,
                "{:>4}.{:03} {:5} [{}]: {}",
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                record.level(),
                target,
                record.args()
            )
        })
        .filter_level(log_filter_from_level(log_level))
        .init();
}

/// Converts a numeric log level to a log filter.
///
/// 0 is `Error`, 1 `Warn`, 2 `Info`, 3 `Debug`; anything above is `Trace`.
pub fn log_filter_from_level(level: u8) -> log::LevelFilter {
    match level {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
