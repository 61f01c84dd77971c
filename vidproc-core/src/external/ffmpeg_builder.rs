//! FFmpeg command builder utilities
//!
//! Every ffmpeg invocation starts from [`FfmpegCommandBuilder`], which applies
//! the binary override and the global flags shared by all operations.

use crate::config::{CoreConfig, DEFAULT_FFMPEG_BIN};
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::PathBuf;

/// Builder for creating `FFmpeg` commands with common configurations
#[derive(Debug, Clone)]
pub struct FfmpegCommandBuilder {
    binary: PathBuf,
    hide_banner: bool,
    overwrite: bool,
}

impl Default for FfmpegCommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegCommandBuilder {
    /// Creates a new `FFmpeg` command builder with sensible defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_FFMPEG_BIN),
            hide_banner: true,
            overwrite: true,
        }
    }

    /// Starts from the binary and overwrite policy in `config`.
    #[must_use]
    pub fn from_config(config: &CoreConfig) -> Self {
        Self {
            binary: config.ffmpeg_binary().to_path_buf(),
            overwrite: config.overwrite_output,
            ..Self::new()
        }
    }

    /// Uses a specific ffmpeg binary instead of the one on PATH
    #[must_use]
    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = binary;
        self
    }

    /// Sets whether to hide the `FFmpeg` banner
    #[must_use]
    pub fn with_hide_banner(mut self, hide: bool) -> Self {
        self.hide_banner = hide;
        self
    }

    /// `-y` when true, `-n` (never overwrite) when false
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Builds the `FFmpeg` command with all configured options
    #[must_use]
    pub fn build(self) -> FfmpegCommand {
        // Always an explicit program: ffmpeg-sidecar's own default points at
        // its download directory rather than PATH.
        let mut cmd = FfmpegCommand::new_with_path(&self.binary);

        if self.hide_banner {
            cmd.arg("-hide_banner");
        }
        cmd.arg(if self.overwrite { "-y" } else { "-n" });

        cmd
    }
}

/// Collects the arguments of a built command, for logging and tests.
pub fn command_args(cmd: &mut FfmpegCommand) -> Vec<String> {
    cmd.as_inner()
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}
