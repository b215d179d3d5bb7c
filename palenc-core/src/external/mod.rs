//! Interactions with external CLI tools.
//!
//! Everything that leaves the process lives here: the mediainfo metadata
//! reader and the HandBrakeCLI executor. Both are fronted by traits so the
//! processing pipeline can be driven by mocks in tests.

use std::process::{Command, Stdio};

use crate::error::{command_start_error, CoreResult};

/// Metadata reading via the mediainfo CLI
pub mod mediainfo;

/// HandBrakeCLI argument assembly and execution
pub mod handbrake;

/// Mock implementations for testing (feature `test-mocks`)
#[cfg(feature = "test-mocks")]
pub mod mocks;

pub use handbrake::{
    EncodeExecutor, EncodeProfile, HandbrakeCommandBuilder, SystemEncodeExecutor,
};
pub use mediainfo::{
    AudioStream, MediaStreams, MediainfoReader, MetadataReader, SubtitleStream,
};

/// Checks that an external command exists and can be started.
///
/// Runs the command with `--version`, discarding its output. A missing
/// binary maps to [`crate::error::CoreError::ToolMissing`]; a binary that
/// exists but fails to start maps to
/// [`crate::error::CoreError::CommandStart`]. The exit status itself is
/// irrelevant here.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) => Err(command_start_error(cmd_name, e)),
    }
}
