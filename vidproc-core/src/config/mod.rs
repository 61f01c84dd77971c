//! Configuration structures and constants for the vidproc-core library.
//!
//! The configuration only tells the library where the external tools live,
//! where scratch files go and whether outputs may be overwritten. Everything
//! else is decided per call.

mod builder;

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

pub use builder::CoreConfigBuilder;

// Default constants

/// ffprobe binary looked up on PATH when no override is configured.
pub const DEFAULT_FFPROBE_BIN: &str = "ffprobe";

/// ffmpeg binary looked up on PATH when no override is configured.
pub const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";

/// Main configuration structure for the vidproc-core library.
///
/// All fields have sensible defaults; `CoreConfig::default()` probes and
/// encodes with whatever `ffprobe`/`ffmpeg` are on PATH.
///
/// # Examples
///
/// ```rust
/// use vidproc_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .ffmpeg_path(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
///     .overwrite_output(false)
///     .build();
/// assert!(!config.overwrite_output);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Optional path to the ffmpeg binary
    pub ffmpeg_path: Option<PathBuf>,

    /// Optional path to the ffprobe binary
    pub ffprobe_path: Option<PathBuf>,

    /// Optional directory for temporary files (defaults to the system temp dir)
    pub temp_dir: Option<PathBuf>,

    /// Whether burn/concat outputs replace existing files (ffmpeg `-y`).
    /// When false, ffmpeg is run with `-n` and fails if the output exists.
    pub overwrite_output: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            temp_dir: None,
            overwrite_output: true,
        }
    }
}

impl CoreConfig {
    pub fn ffmpeg_binary(&self) -> &Path {
        self.ffmpeg_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_FFMPEG_BIN))
    }

    pub fn ffprobe_binary(&self) -> &Path {
        self.ffprobe_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_FFPROBE_BIN))
    }

    /// Checks the configured paths.
    ///
    /// Binary overrides are not checked here; a missing binary is reported as
    /// `ProcessNotFound` when it is first used.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(dir) = &self.temp_dir {
            if !dir.is_dir() {
                return Err(CoreError::InvalidInput(format!(
                    "Temporary directory '{}' does not exist or is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
