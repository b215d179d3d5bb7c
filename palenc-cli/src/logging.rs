//! Logging setup: every run logs to the console and to a timestamped file.

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS",
/// used to name per-run log files.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Initializes the global logger with fan-out to stdout and a fresh log
/// file under `log_dir`. Returns the log file path.
pub fn setup_logging(log_dir: &Path, verbose: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(format!("palenc_run_{}.log", get_timestamp()));

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(fern::log_file(&log_path)?)
        .apply()?;

    Ok(log_path)
}
