//! FFprobe integration for media analysis
//!
//! Runs `ffprobe -print_format json -show_format -show_streams` against a
//! file and turns the document into a [`MediaInfo`].
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_start_error};
use crate::media::MediaInfo;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Something that can produce a [`MediaInfo`] for a file.
pub trait FfprobeExecutor {
    /// Probes `input_path`. Every call runs the tool again; nothing is cached.
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo>;
}

/// Runs the ffprobe binary as a child process.
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    binary: PathBuf,
}

impl Default for CommandFfprobeExecutor {
    fn default() -> Self {
        Self::from_config(&CoreConfig::default())
    }
}

impl CommandFfprobeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::with_binary(config.ffprobe_binary())
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, input_path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(input_path);
        cmd
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        let mut cmd = self.command(input_path);
        log::debug!("Running ffprobe: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| command_start_error(self.binary.display().to_string(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            log::error!(
                "ffprobe failed for {} ({}): {}",
                input_path.display(),
                output.status,
                stderr
            );
            let reason = if stderr.is_empty() {
                format!("ffprobe {}", output.status)
            } else {
                format!("ffprobe {}: {}", output.status, stderr)
            };
            return Err(CoreError::ProbeFailure {
                path: input_path.to_path_buf(),
                reason,
            });
        }

        let json: Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            log::error!("Unparseable ffprobe output for {}: {}", input_path.display(), e);
            CoreError::ProbeFailure {
                path: input_path.to_path_buf(),
                reason: format!("ffprobe output is not valid JSON: {e}"),
            }
        })?;

        MediaInfo::from_ffprobe_json(input_path, &json)
    }
}
