// ============================================================================
// vidproc-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and ffmpeg
//
// This module encapsulates every child process the library starts. Probing
// and encoding sit behind traits so callers (and tests) can substitute their
// own implementations.
//
// KEY COMPONENTS:
// - FfprobeExecutor / CommandFfprobeExecutor: JSON probing via ffprobe
// - FfmpegSpawner / SidecarSpawner: ffmpeg execution via ffmpeg-sidecar
// - FfmpegCommandBuilder: shared global flags for every ffmpeg call
// - Dependency checking

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Builder for ffmpeg commands with the project's global flags
pub mod ffmpeg_builder;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

/// Test doubles for both executors
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{FfmpegCommandBuilder, command_args};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, run_ffmpeg};
pub use ffprobe_executor::{CommandFfprobeExecutor, FfprobeExecutor};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks whether an external command can be started.
///
/// Runs `<cmd> -version` with output discarded. Only a failure to start
/// counts as unavailable; the exit status is ignored.
///
/// ```rust,no_run
/// use vidproc_core::external::is_tool_available;
///
/// if !is_tool_available("ffmpeg") {
///     eprintln!("ffmpeg is not installed");
/// }
/// ```
pub fn is_tool_available<S: AsRef<OsStr>>(cmd_name: S) -> bool {
    let cmd_name = cmd_name.as_ref();
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name.to_string_lossy());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name.to_string_lossy());
            false
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                cmd_name.to_string_lossy(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_is_unavailable() {
        assert!(!is_tool_available("vidproc-definitely-not-a-real-tool"));
    }
}
