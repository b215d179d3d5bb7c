//! Durable record of already-processed source files.
//!
//! The ledger is a line-oriented text file holding one source basename per
//! line. It only ever grows: `record` appends, nothing removes. A crash
//! between a finished encode and the append costs at most one harmless
//! re-encode on the next run.
//!
//! Identity is the file's basename, not its full path. Two directories
//! containing same-named files are treated as the same source. Callers must
//! check [`ProcessedLedger::contains`] before encoding; the append itself
//! does not deduplicate.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// In-memory view of the processed-files ledger, backed by a text file.
#[derive(Debug)]
pub struct ProcessedLedger {
    path: PathBuf,
    entries: HashSet<String>,
}

impl ProcessedLedger {
    /// Loads the ledger from `path`.
    ///
    /// A missing file is an empty ledger (first run). Any other read fault
    /// is a [`CoreError::LedgerRead`]; callers may choose to continue with
    /// an empty set at the cost of possible reprocessing.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(CoreError::LedgerRead(e)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// An empty ledger bound to `path`, for callers that choose to keep
    /// going after a read fault. Reprocessing already-encoded files is the
    /// accepted cost.
    #[must_use]
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: HashSet::new(),
        }
    }

    /// Returns true if `id` has already been processed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains(id)
    }

    /// Appends `id` to the durable ledger and the in-memory set.
    ///
    /// The write is append-only so a crash mid-run loses at most the
    /// in-flight record.
    pub fn record(&mut self, id: &str) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(CoreError::LedgerWrite)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(CoreError::LedgerWrite)?;
        writeln!(file, "{id}").map_err(CoreError::LedgerWrite)?;

        self.entries.insert(id.to_string());
        Ok(())
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
