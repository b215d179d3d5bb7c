//! Batch orchestration: metadata → selection → command → encode → ledger.
//!
//! One file at a time, strictly sequential. No failure on a single file is
//! allowed to abort the batch; everything is logged and the loop moves on.
//! The ledger is consulted before a file is touched and appended only
//! after a successful encode, so a crash anywhere in between costs at most
//! one harmless re-encode on the next run.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use log::{debug, error, info, warn};

use crate::config::{CoreConfig, OUTPUT_EXTENSION};
use crate::error::{CoreError, CoreResult};
use crate::external::handbrake::{EncodeExecutor, HandbrakeCommandBuilder};
use crate::external::mediainfo::{MediaStreams, MetadataReader};
use crate::ledger::ProcessedLedger;
use crate::processing::audio::select_audio_tracks;
use crate::processing::subtitles::select_subtitle_tracks;
use crate::utils::{format_bytes, get_filename_safe};
use crate::EncodeResult;

/// Processes a list of source files according to the configuration.
///
/// Generic over the external collaborators so tests can drive the loop
/// with mocks:
/// - `R`: [`MetadataReader`] for stream enumeration
/// - `E`: [`EncodeExecutor`] for running HandBrakeCLI
///
/// Files whose basename is already in the ledger are skipped. Returns one
/// [`EncodeResult`] per successfully encoded file; per-file failures are
/// logged and swallowed. The only fatal errors are environmental ones
/// raised before any file is attempted (output directory not creatable).
pub fn process_videos<R: MetadataReader, E: EncodeExecutor>(
    metadata_reader: &R,
    encoder: &E,
    ledger: &mut ProcessedLedger,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
) -> CoreResult<Vec<EncodeResult>> {
    fs::create_dir_all(&config.output_dir)?;

    let mut results: Vec<EncodeResult> = Vec::new();

    for input_path in files_to_process {
        let filename = match get_filename_safe(input_path) {
            Ok(name) => name,
            Err(e) => {
                warn!("Skipping entry without a usable filename: {e}");
                continue;
            }
        };

        if ledger.contains(&filename) {
            debug!("Already processed, skipping: {filename}");
            continue;
        }

        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());
        let output_path = config
            .output_dir
            .join(format!("{stem}.{OUTPUT_EXTENSION}"));

        info!("New file found: {filename}; starting encode");
        let file_start_time = Instant::now();

        // A file the metadata tool cannot read is still worth encoding:
        // HandBrake falls back to its own stream choices when we pass no
        // selection.
        let streams = match metadata_reader.read(input_path) {
            Ok(streams) => streams,
            Err(e) => {
                warn!("Metadata unavailable for {filename}: {e}; continuing without track selection");
                MediaStreams::default()
            }
        };

        let audio_indices = select_audio_tracks(&streams.audio, &config.audio_languages);
        if audio_indices.is_empty() && !streams.audio.is_empty() {
            warn!("No audio stream matched the language preference for {filename}");
        }
        let subtitle_selection = select_subtitle_tracks(&streams.text, &config.subtitle_rules);

        let args = HandbrakeCommandBuilder::new(input_path, &output_path, &config.profile)
            .with_audio(&audio_indices, &config.audio_names)
            .with_subtitles(&subtitle_selection)
            .build();
        debug!("Encoder arguments for {filename}: {args:?}");

        match encoder.execute(&config.handbrake_path, &args) {
            Ok(()) => {}
            Err(CoreError::ToolMissing(tool)) => {
                warn!("Encoder '{tool}' is not installed or not on the search path; skipping {filename}");
                continue;
            }
            Err(e) => {
                error!("Encoding {filename} failed: {e}");
                continue;
            }
        }

        // The encode is done; a ledger fault only risks a wasteful
        // re-encode on the next run, never data loss.
        if let Err(e) = ledger.record(&filename) {
            error!("Encoded {filename} but could not record it in the ledger: {e}");
        }

        let input_size = fs::metadata(input_path).map(|m| m.len()).unwrap_or(0);
        let output_size = fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0);
        info!(
            "Successfully encoded {} to {} ({} -> {})",
            filename,
            output_path.display(),
            format_bytes(input_size),
            format_bytes(output_size),
        );

        results.push(EncodeResult {
            filename,
            duration: file_start_time.elapsed(),
            input_size,
            output_size,
        });
    }

    Ok(results)
}
