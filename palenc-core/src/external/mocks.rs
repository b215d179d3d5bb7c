// --- Mocking Infrastructure (for testing) ---

// This module is only compiled when the "test-mocks" feature is enabled.
#![cfg(feature = "test-mocks")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{CoreError, CoreResult};
use crate::external::handbrake::EncodeExecutor;
use crate::external::mediainfo::{MediaStreams, MetadataReader};

/// Mock [`MetadataReader`] returning canned streams per path.
///
/// Paths without an expectation answer with `MetadataUnavailable`, which the
/// pipeline degrades to an empty selection.
#[derive(Clone, Default)]
pub struct MockMetadataReader {
    expectations: Rc<RefCell<HashMap<PathBuf, MediaStreams>>>,
    received_calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockMetadataReader {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn expect_streams(&self, path: &Path, streams: MediaStreams) {
        self.expectations
            .borrow_mut()
            .insert(path.to_path_buf(), streams);
    }

    #[must_use]
    pub fn received_calls(&self) -> Vec<PathBuf> {
        self.received_calls.borrow().clone()
    }
}

impl MetadataReader for MockMetadataReader {
    fn read(&self, path: &Path) -> CoreResult<MediaStreams> {
        self.received_calls.borrow_mut().push(path.to_path_buf());
        self.expectations
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                CoreError::MetadataUnavailable(format!(
                    "no mock metadata registered for {}",
                    path.display()
                ))
            })
    }
}

/// Mock [`EncodeExecutor`] recording every invocation.
///
/// By default every call succeeds; `fail_next` queues scripted failures
/// consumed in order.
#[derive(Clone, Default)]
pub struct MockEncodeExecutor {
    queued_failures: Rc<RefCell<Vec<fn(String) -> CoreError>>>,
    received_calls: Rc<RefCell<Vec<(PathBuf, Vec<String>)>>>,
}

impl MockEncodeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Queues a failure for the next invocation. Multiple queued failures
    /// are consumed first-in first-out, after which calls succeed again.
    pub fn fail_next(&self, make_error: fn(String) -> CoreError) {
        self.queued_failures.borrow_mut().push(make_error);
    }

    /// All `(program, args)` pairs this executor has been asked to run.
    #[must_use]
    pub fn received_calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.received_calls.borrow().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.received_calls.borrow().len()
    }
}

impl EncodeExecutor for MockEncodeExecutor {
    fn execute(&self, program: &Path, args: &[String]) -> CoreResult<()> {
        self.received_calls
            .borrow_mut()
            .push((program.to_path_buf(), args.to_vec()));

        let failure = {
            let mut queued = self.queued_failures.borrow_mut();
            if queued.is_empty() {
                None
            } else {
                Some(queued.remove(0))
            }
        };

        match failure {
            Some(make_error) => Err(make_error(program.to_string_lossy().into_owned())),
            None => Ok(()),
        }
    }
}

/// Shorthand for a `ToolMissing` failure, for use with `fail_next`.
pub fn tool_missing_error(tool: String) -> CoreError {
    CoreError::ToolMissing(tool)
}

/// Shorthand for a generic encode failure, for use with `fail_next`.
pub fn encode_failed_error(tool: String) -> CoreError {
    CoreError::CommandFailed {
        tool,
        status: std::process::ExitStatus::default(),
        stderr: "mock encode failure".to_string(),
    }
}
