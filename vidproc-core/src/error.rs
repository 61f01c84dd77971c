// ============================================================================
// vidproc-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for vidproc-core
//
// Every failure surfaced by the library is a `CoreError`. Errors are raised
// synchronously to the caller of the operation that triggered them; nothing
// is retried or recovered internally.
//
// KEY COMPONENTS:
// - CoreError: Main error enum, one variant per failure kind
// - CoreResult: Type alias for Result with CoreError
// - Helper functions for creating command-related errors

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

use crate::media::StreamType;

/// Errors produced while probing or editing media.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external binary (ffmpeg/ffprobe) is not installed or not on PATH.
    #[error("Required external tool '{0}' was not found. Is it installed and on PATH?")]
    ProcessNotFound(String),

    /// The binary exists but the operating system refused to start it.
    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, io::Error),

    /// ffprobe exited non-zero or produced output that could not be parsed.
    #[error("ffprobe failed for '{}': {reason}", .path.display())]
    ProbeFailure { path: PathBuf, reason: String },

    #[error("No {kind} stream found in '{}'", .path.display())]
    StreamNotFound { path: PathBuf, kind: StreamType },

    /// `scope` names where the field was looked up, e.g. "video stream" or "format".
    #[error("Missing or unusable '{field}' in {scope} of '{}'", .path.display())]
    FieldMissing {
        path: PathBuf,
        scope: String,
        field: &'static str,
    },

    /// ffmpeg exited non-zero; `stderr` carries its trailing diagnostic output.
    #[error("ffmpeg {operation} failed ({status}):\n{stderr}")]
    EncodeFailure {
        operation: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for vidproc-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Maps a spawn failure to `ProcessNotFound` or `CommandStart`.
pub fn command_start_error(tool: impl Into<String>, error: io::Error) -> CoreError {
    let tool = tool.into();
    if error.kind() == io::ErrorKind::NotFound {
        CoreError::ProcessNotFound(tool)
    } else {
        CoreError::CommandStart(tool, error)
    }
}

/// Builds an `EncodeFailure` from an ffmpeg exit status and its stderr text.
pub fn command_failed_error(
    operation: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::EncodeFailure {
        operation: operation.into(),
        status: status.to_string(),
        stderr: stderr.into(),
    }
}

pub(crate) fn field_missing(path: &Path, scope: impl Into<String>, field: &'static str) -> CoreError {
    CoreError::FieldMissing {
        path: path.to_path_buf(),
        scope: scope.into(),
        field,
    }
}
