// vidproc-cli/src/commands/inspect.rs
//
// Read-only subcommands. Each one probes the input exactly once.

use std::io::{self, Write};

use vidproc_core::VideoProcessor;
use vidproc_core::external::{FfmpegSpawner, FfprobeExecutor};

use crate::cli::StreamSelector;
use crate::error::CliResult;
use crate::output::{format_fps, print_media_info};

pub fn run_info<P, S, W>(processor: &VideoProcessor<P, S>, json: bool, out: &mut W) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    let info = processor.get_video_info()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &info).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        print_media_info(out, &info)?;
    }
    Ok(())
}

pub fn run_codec<P, S, W>(processor: &VideoProcessor<P, S>, stream: StreamSelector, out: &mut W) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    let codec = match stream {
        StreamSelector::Video => processor.get_video_codec()?,
        StreamSelector::Audio => processor.get_audio_codec()?,
    };
    writeln!(out, "{codec}")?;
    Ok(())
}

/// Prints bits per second as a plain integer.
pub fn run_bitrate<P, S, W>(processor: &VideoProcessor<P, S>, stream: StreamSelector, out: &mut W) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    let bitrate = match stream {
        StreamSelector::Video => processor.get_video_bitrate()?,
        StreamSelector::Audio => processor.get_audio_bitrate()?,
    };
    writeln!(out, "{bitrate}")?;
    Ok(())
}

pub fn run_dimensions<P, S, W>(processor: &VideoProcessor<P, S>, out: &mut W) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    let (width, height) = processor.get_video_dimensions()?;
    writeln!(out, "{width}x{height}")?;
    Ok(())
}

pub fn run_sample_rate<P, S, W>(processor: &VideoProcessor<P, S>, out: &mut W) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    writeln!(out, "{}", processor.get_audio_sample_rate()?)?;
    Ok(())
}

pub fn run_frame_rate<P, S, W>(processor: &VideoProcessor<P, S>, out: &mut W) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    writeln!(out, "{}", format_fps(processor.get_frame_rate()?))?;
    Ok(())
}

/// Prints seconds with millisecond precision.
pub fn run_duration<P, S, W>(processor: &VideoProcessor<P, S>, out: &mut W) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    writeln!(out, "{:.3}", processor.get_duration()?)?;
    Ok(())
}
