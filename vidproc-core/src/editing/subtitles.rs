//! Burning a subtitle file into the video picture.
//!
//! The video stream is re-encoded through ffmpeg's `subtitles` filter using the
//! source's own codec and bitrate; audio is stream-copied.

use std::path::Path;

use ffmpeg_sidecar::command::FfmpegCommand;

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{FfmpegCommandBuilder, FfmpegSpawner, run_ffmpeg};

use super::{reject_output_in_place, require_file};

/// Encoder settings for the re-encoded video stream.
///
/// A `None` field is left out of the command line and ffmpeg's default applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BurnOptions {
    pub video_codec: Option<String>,
    /// Target video bitrate in bits per second.
    pub video_bitrate: Option<u64>,
}

fn backslash_escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes a value for use as a filter option inside a `-vf` filtergraph.
///
/// Two levels apply: the option parser (`\ ' :`) and then the filtergraph
/// parser (`\ ' , ; [ ]`).
pub fn escape_filter_value(value: &str) -> String {
    let option_level = backslash_escape(value, &['\\', '\'', ':']);
    backslash_escape(&option_level, &['\\', '\'', ',', ';', '[', ']'])
}

/// The `subtitles` filter description for `subtitle_path`.
pub fn subtitles_filter(subtitle_path: &Path) -> String {
    format!(
        "subtitles=filename={}",
        escape_filter_value(&subtitle_path.to_string_lossy())
    )
}

pub(crate) fn build_burn_command(
    config: &CoreConfig,
    source: &Path,
    subtitle_path: &Path,
    output: &Path,
    options: &BurnOptions,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::from_config(config).build();
    cmd.input(source.to_string_lossy().as_ref());
    cmd.args(["-vf", subtitles_filter(subtitle_path).as_str()]);
    if let Some(codec) = &options.video_codec {
        cmd.args(["-c:v", codec.as_str()]);
    }
    if let Some(bitrate) = options.video_bitrate {
        cmd.args(["-b:v", bitrate.to_string().as_str()]);
    }
    cmd.args(["-c:a", "copy"]);
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Renders `subtitle_path` onto the video of `source`, writing `output`.
///
/// Fails with `InvalidInput` before starting ffmpeg if the subtitle file does
/// not exist or `output` would overwrite `source`.
pub fn burn_subtitles<S: FfmpegSpawner>(
    spawner: &S,
    config: &CoreConfig,
    source: &Path,
    subtitle_path: &Path,
    output: &Path,
    options: &BurnOptions,
) -> CoreResult<()> {
    require_file(subtitle_path, "Subtitle file")?;
    reject_output_in_place(output, &[source, subtitle_path])?;

    log::info!(
        "Burning subtitles {} into {} -> {}",
        subtitle_path.display(),
        source.display(),
        output.display()
    );
    let cmd = build_burn_command(config, source, subtitle_path, output, options);
    run_ffmpeg(spawner, cmd, "burn-subtitles")
}
