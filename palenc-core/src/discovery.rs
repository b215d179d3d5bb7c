//! File discovery for the watched input directory.
//!
//! Scans the top level of the input directory only. Every regular file is a
//! candidate: PAL-DVD rips arrive in whatever container the ripper produced
//! (.mkv, .vob, .mpg, ...), and HandBrakeCLI decides what it can read. An
//! empty directory is the normal idle state, not an error.

use crate::error::CoreResult;

use std::path::{Path, PathBuf};

/// Finds candidate source files in the given directory.
///
/// Returns the paths of all regular files at the top level, in directory
/// order. Subdirectories are never descended into.
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            path.is_file().then_some(path)
        })
        .collect();

    Ok(files)
}
