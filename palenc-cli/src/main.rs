// palenc-cli/src/main.rs
//
// Command-line front-end for the palenc batch transcoding watcher.
//
// Responsibilities:
// - Parsing command-line arguments with clap.
// - Setting up logging to both console and a per-run log file.
// - Building the core configuration and validating it.
// - Running the batch once, or repeatedly in watch mode.
// - Printing a summary and exiting 0 on normal completion (per-file
//   failures are log lines, not exit codes).

use clap::Parser;
use log::{error, info, warn};
use palenc_core::external::{check_dependency, MediainfoReader, SystemEncodeExecutor};
use palenc_core::{
    find_processable_files, format_bytes, format_duration, process_videos, CoreConfig,
    ProcessedLedger,
};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

mod logging;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "palenc: PAL-DVD batch transcoding watcher",
    long_about = "Watches an input directory for video files, selects preferred audio \
                  and subtitle tracks, and encodes each file with HandBrakeCLI using a \
                  profile tuned for PAL-DVD source material."
)]
struct Cli {
    /// Directory watched for new source files
    #[arg(short, long, value_name = "DIR", default_value = "videos/input")]
    input_dir: PathBuf,

    /// Directory where encoded files are saved
    #[arg(short, long, value_name = "DIR", default_value = "videos/output")]
    output_dir: PathBuf,

    /// Ledger file recording already-processed basenames
    #[arg(long, value_name = "FILE", default_value = "temp/processed_files.txt")]
    ledger: PathBuf,

    /// Path to the HandBrakeCLI binary
    #[arg(long, value_name = "PATH", default_value = "HandBrakeCLI")]
    handbrake: PathBuf,

    /// Directory for log files (defaults to OUTPUT_DIR/logs)
    #[arg(short, long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Keep watching the input directory instead of running once
    #[arg(short, long)]
    watch: bool,

    /// Seconds between scans in watch mode
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    interval: u64,

    /// Enable detailed logging output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| cli.output_dir.join("logs"));
    let log_path = match logging::setup_logging(&log_dir, cli.verbose) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to set up logging: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(cli, &log_path) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(cli: Cli, log_path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CoreConfig::new(cli.input_dir, cli.output_dir, cli.ledger);
    config.handbrake_path = cli.handbrake;
    config.validate()?;

    info!("Input directory: {}", config.input_dir.display());
    info!("Output directory: {}", config.output_dir.display());
    info!("Ledger file: {}", config.ledger_path.display());
    info!("Log file: {}", log_path.display());

    // Both tools are optional at startup; a missing one only affects the
    // files it would have touched.
    if let Err(e) = check_dependency("mediainfo") {
        warn!("mediainfo not usable ({e}); files will be encoded without track selection");
    }
    if let Err(e) = check_dependency(&config.handbrake_path.to_string_lossy()) {
        warn!("HandBrakeCLI not usable ({e}); encodes will be skipped until it is installed");
    }

    if cli.watch {
        info!("Watching {} every {}s", config.input_dir.display(), cli.interval);
        loop {
            run_batch(&config);
            thread::sleep(Duration::from_secs(cli.interval));
        }
    } else {
        run_batch(&config);
    }

    Ok(())
}

/// Runs one scan-and-encode pass. Never fails the process: every problem
/// is logged and the next run gets another chance.
fn run_batch(config: &CoreConfig) {
    let batch_start = Instant::now();

    let files = match find_processable_files(&config.input_dir) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to scan {}: {e}", config.input_dir.display());
            return;
        }
    };

    // A ledger read fault degrades to an empty set; the cost is a possible
    // re-encode, never a lost file.
    let mut ledger = match ProcessedLedger::load(&config.ledger_path) {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!("{e}; continuing with an empty ledger");
            ProcessedLedger::empty(&config.ledger_path)
        }
    };

    let results = match process_videos(
        &MediainfoReader::new(),
        &SystemEncodeExecutor::new(),
        &mut ledger,
        config,
        &files,
    ) {
        Ok(results) => results,
        Err(e) => {
            error!("Batch aborted: {e}");
            return;
        }
    };

    if results.is_empty() {
        info!("Nothing to encode ({} files scanned)", files.len());
        return;
    }

    info!("Encoded {} file(s) this run:", results.len());
    for result in &results {
        info!(
            "  {}: {} ({} -> {})",
            result.filename,
            format_duration(result.duration.as_secs_f64()),
            format_bytes(result.input_size),
            format_bytes(result.output_size),
        );
    }
    info!(
        "Batch finished in {}",
        format_duration(batch_start.elapsed().as_secs_f64())
    );
}
