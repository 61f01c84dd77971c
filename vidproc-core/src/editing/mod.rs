//! Operations that write a new media file with ffmpeg.
//!
//! Each operation validates its inputs before any process is started, then
//! runs exactly one ffmpeg command.

pub mod concat;
pub mod subtitles;

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

pub use concat::{MIN_CONCAT_INPUTS, concat_list_entry, concatenate_videos};
pub use subtitles::{BurnOptions, burn_subtitles, escape_filter_value, subtitles_filter};

/// Fails with `InvalidInput` unless `path` is an existing regular file.
pub(crate) fn require_file(path: &Path, what: &str) -> CoreResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "{what} '{}' does not exist or is not a file",
            path.display()
        )))
    }
}

/// Absolute form of `path` without requiring it to exist.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Fails with `InvalidInput` when `output` would overwrite one of `inputs`.
pub(crate) fn reject_output_in_place(output: &Path, inputs: &[&Path]) -> CoreResult<()> {
    let output_abs = absolute(output);
    if let Some(clash) = inputs.iter().find(|input| absolute(input) == output_abs) {
        return Err(CoreError::InvalidInput(format!(
            "Output '{}' is the same file as input '{}'",
            output.display(),
            clash.display()
        )));
    }
    Ok(())
}
