use chrono::Local;
use log::LevelFilter;
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// Maps the loglevel strings used across the crate to a `LevelFilter`.
/// `None` (no loglevel given) means `Info`; unrecognised strings give `None`.
pub fn level_filter(loglevel: Option<&str>) -> Option<LevelFilter> {
    let Some(level) = loglevel else {
        return Some(LevelFilter::Info);
    };
    match level.trim().to_lowercase().as_str() {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" | "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// `log_<date>_<time>.txt`
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs a terminal logger and, when `log_file` is given, a file logger
/// next to it.
///
/// Returns true if this call installed the logger. A logger that is already
/// installed (a second engine run in the same process) is left in place, and
/// a log file that cannot be created only drops the file sink.
pub fn init_logger(loglevel: Option<&str>, log_file: Option<&Path>) -> bool {
    let log_option = level_filter(loglevel).unwrap_or_else(|| {
        eprintln!(
            "unknown loglevel {:?}, expected debug, info, warn, error or off; using info",
            loglevel
        );
        LevelFilter::Info
    });
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(log_option, Config::default(), file)),
            Err(e) => eprintln!("cannot create log file {}: {}", path.display(), e),
        }
    }
    CombinedLogger::init(loggers).is_ok()
}
