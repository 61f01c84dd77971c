//! Temporary file management utilities.
//!
//! Thin helpers over the tempfile crate. Files are deleted when the returned
//! handle is dropped, including on early returns through `?`.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Directory scratch files go to: the configured one, else the system temp dir.
pub fn temp_base_dir(config: &CoreConfig) -> PathBuf {
    config.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
}

/// Creates a temporary file with prefix and extension. Auto-deleted when dropped.
pub fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> CoreResult<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix(&format!("{prefix}_"))
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}
