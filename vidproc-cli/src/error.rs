// ============================================================================
// vidproc-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and exit codes
//
// The CLI does not define its own error type; every failure is a
// `CoreError`. This module decides which process exit code each kind maps to.

use vidproc_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Generic failure.
pub const EXIT_FAILURE: i32 = 1;
/// Bad arguments or input files (also what clap uses for usage errors).
pub const EXIT_INVALID_INPUT: i32 = 2;
/// ffmpeg or ffprobe is not installed.
pub const EXIT_TOOL_MISSING: i32 = 3;
/// The source could not be probed or lacks the requested property.
pub const EXIT_PROBE: i32 = 4;
/// ffmpeg failed while writing an output.
pub const EXIT_ENCODE: i32 = 5;

/// Maps an error to the process exit code reported by `vidproc`.
pub fn exit_code(error: &CoreError) -> i32 {
    match error {
        CoreError::InvalidInput(_) => EXIT_INVALID_INPUT,
        CoreError::ProcessNotFound(_) => EXIT_TOOL_MISSING,
        CoreError::ProbeFailure { .. }
        | CoreError::StreamNotFound { .. }
        | CoreError::FieldMissing { .. } => EXIT_PROBE,
        CoreError::EncodeFailure { .. } => EXIT_ENCODE,
        CoreError::Io(_) | CoreError::CommandStart(..) => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vidproc_core::StreamType;

    #[test]
    fn exit_codes_distinguish_failure_kinds() {
        assert_eq!(exit_code(&CoreError::InvalidInput("x".into())), 2);
        assert_eq!(exit_code(&CoreError::ProcessNotFound("ffmpeg".into())), 3);
        assert_eq!(
            exit_code(&CoreError::StreamNotFound {
                path: PathBuf::from("a.mp4"),
                kind: StreamType::Audio,
            }),
            4
        );
        assert_eq!(
            exit_code(&CoreError::EncodeFailure {
                operation: "concat".into(),
                status: "exit status: 1".into(),
                stderr: String::new(),
            }),
            5
        );
        assert_eq!(
            exit_code(&CoreError::Io(std::io::Error::other("disk full"))),
            1
        );
    }
}
