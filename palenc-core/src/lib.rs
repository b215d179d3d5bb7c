//! Core library for the palenc PAL-DVD batch transcoding watcher.
//!
//! This crate provides source file discovery, media stream enumeration,
//! audio and subtitle track selection, HandBrakeCLI command assembly, and
//! the append-only ledger that makes repeated batch runs idempotent.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use palenc_core::{CoreConfig, ProcessedLedger, process_videos};
//! use palenc_core::external::{MediainfoReader, SystemEncodeExecutor};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("videos/input"),
//!     PathBuf::from("videos/output"),
//!     PathBuf::from("temp/processed_files.txt"),
//! );
//! config.validate().unwrap();
//!
//! let files = palenc_core::find_processable_files(&config.input_dir).unwrap();
//! let mut ledger = ProcessedLedger::load(&config.ledger_path).unwrap();
//!
//! let results = process_videos(
//!     &MediainfoReader::new(),
//!     &SystemEncodeExecutor::new(),
//!     &mut ledger,
//!     &config,
//!     &files,
//! ).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod ledger;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use config::CoreConfig;
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use ledger::ProcessedLedger;
pub use processing::process_videos;
pub use utils::{format_bytes, format_duration};

use std::time::Duration;

/// Result of one successful encode, returned by
/// [`processing::batch::process_videos`] for each finished file.
#[derive(Debug, Clone)]
pub struct EncodeResult {
    pub filename: String,
    pub duration: Duration,
    pub input_size: u64,
    pub output_size: u64,
}
