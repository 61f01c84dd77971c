//! Joining several videos end to end without re-encoding.
//!
//! Uses ffmpeg's concat demuxer with `-c copy`, so the inputs must share
//! codecs and stream layout. A mismatch surfaces as an ffmpeg failure.

use std::io::Write;
use std::path::{Path, PathBuf};

use ffmpeg_sidecar::command::FfmpegCommand;

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegCommandBuilder, FfmpegSpawner, run_ffmpeg};
use crate::temp_files::{create_temp_file, temp_base_dir};

use super::{absolute, reject_output_in_place, require_file};

pub const MIN_CONCAT_INPUTS: usize = 2;

/// One line of a concat demuxer list. Single quotes in the path become `'\''`.
pub fn concat_list_entry(path: &Path) -> String {
    format!("file '{}'", path.to_string_lossy().replace('\'', r"'\''"))
}

fn validate_inputs(inputs: &[PathBuf], output: &Path) -> CoreResult<Vec<PathBuf>> {
    if inputs.len() < MIN_CONCAT_INPUTS {
        return Err(CoreError::InvalidInput(format!(
            "Concatenation needs at least {MIN_CONCAT_INPUTS} inputs, got {}",
            inputs.len()
        )));
    }
    for input in inputs {
        require_file(input, "Input video")?;
    }
    let borrowed: Vec<&Path> = inputs.iter().map(PathBuf::as_path).collect();
    reject_output_in_place(output, &borrowed)?;

    // The list file lives in a temp dir, so relative entries would resolve
    // against the wrong directory.
    Ok(inputs.iter().map(|input| absolute(input)).collect())
}

pub(crate) fn build_concat_command(config: &CoreConfig, list_file: &Path, output: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::from_config(config).build();
    cmd.args(["-f", "concat", "-safe", "0"]);
    cmd.input(list_file.to_string_lossy().as_ref());
    cmd.args(["-c", "copy"]);
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Concatenates `inputs` in order into `output`.
///
/// All inputs are checked before anything runs. The list file is removed when
/// this returns, whether ffmpeg succeeded or not.
pub fn concatenate_videos<S: FfmpegSpawner>(
    spawner: &S,
    config: &CoreConfig,
    inputs: &[PathBuf],
    output: &Path,
) -> CoreResult<()> {
    let inputs = validate_inputs(inputs, output)?;

    let mut list = create_temp_file(&temp_base_dir(config), "concat", "txt")?;
    for input in &inputs {
        writeln!(list, "{}", concat_list_entry(input))?;
    }
    list.flush()?;
    log::debug!(
        "Wrote concat list {} with {} entries",
        list.path().display(),
        inputs.len()
    );

    log::info!("Concatenating {} videos -> {}", inputs.len(), output.display());
    let cmd = build_concat_command(config, list.path(), output);
    run_ffmpeg(spawner, cmd, "concat")
}
