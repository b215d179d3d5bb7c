//! Error types for the palenc core library.
//!
//! No error defined here is fatal to a batch run: the orchestration loop in
//! [`crate::processing::batch`] logs and continues past every per-file
//! failure. The variants exist so callers can log them at the right level
//! and decide whether a ledger write should happen.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for palenc
#[derive(Error, Debug)]
pub enum CoreError {
    /// The metadata tool could not inspect the file. Callers degrade this
    /// to an empty stream list instead of aborting.
    #[error("Media metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// An external tool was not found on the system at all.
    #[error("External tool not found: {0}")]
    ToolMissing(String),

    /// An external tool exists but failed to start.
    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    /// An external tool ran and exited with a non-zero status.
    #[error("Command '{tool}' failed with status {status}: {stderr}")]
    CommandFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The processed-files ledger exists but could not be read.
    #[error("Failed to read processed-files ledger: {0}")]
    LedgerRead(#[source] io::Error),

    /// The processed-files ledger could not be appended to.
    #[error("Failed to update processed-files ledger: {0}")]
    LedgerWrite(#[source] io::Error),

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("Failed to parse JSON output: {0}")]
    JsonParse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for palenc operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] or [`CoreError::ToolMissing`]
/// depending on the io error kind.
pub fn command_start_error(tool: impl Into<String>, err: io::Error) -> CoreError {
    let tool = tool.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::ToolMissing(tool)
    } else {
        CoreError::CommandStart(tool, err)
    }
}

/// Builds a [`CoreError::CommandFailed`] from a non-zero exit.
pub fn command_failed_error(
    tool: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        tool: tool.into(),
        status,
        stderr: stderr.into(),
    }
}
