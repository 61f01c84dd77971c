// ============================================================================
// vidproc-cli/src/output.rs
// ============================================================================
//
// OUTPUT FORMATTING: What the CLI prints on stdout
//
// Single-value queries print just the value so they compose in shell
// pipelines. `info` prints a labelled summary, styled with `console` when
// stdout is a terminal.

use console::style;
use std::io::{self, Write};
use vidproc_core::{MediaInfo, StreamInfo, StreamType, format_bitrate, format_bytes, format_duration, parse_frame_rate};

const LABEL_WIDTH: usize = 10;

/// Prints `label: value` with the label padded and bold.
pub fn print_field<W: Write, T: std::fmt::Display>(out: &mut W, label: &str, value: T) -> io::Result<()> {
    let label = format!("{label}:");
    writeln!(out, "{} {}", style(format!("{label:<width$}", width = LABEL_WIDTH)).bold(), value)
}

/// Frame rate with three decimals, e.g. "29.970".
pub fn format_fps(fps: f64) -> String {
    format!("{fps:.3}")
}

/// One-line description of a stream, e.g. "video h264 (High) 1920x1080 29.970 fps 2.50 Mb/s".
pub fn describe_stream(stream: &StreamInfo) -> String {
    let mut parts = vec![stream.codec_type.to_string()];
    parts.push(stream.codec_name.clone().unwrap_or_else(|| "?".to_string()));
    if let Some(profile) = &stream.profile {
        parts.push(format!("({profile})"));
    }

    match stream.codec_type {
        StreamType::Video => {
            if let (Some(w), Some(h)) = (stream.width, stream.height) {
                parts.push(format!("{w}x{h}"));
            }
            if let Some(fps) = stream.r_frame_rate.as_deref().and_then(parse_frame_rate) {
                parts.push(format!("{} fps", format_fps(fps)));
            }
        }
        StreamType::Audio => {
            if let Some(rate) = &stream.sample_rate {
                parts.push(format!("{rate} Hz"));
            }
            if let Some(layout) = &stream.channel_layout {
                parts.push(layout.clone());
            } else if let Some(channels) = stream.channels {
                parts.push(format!("{channels} ch"));
            }
        }
        _ => {}
    }

    if let Some(bps) = stream.bit_rate.as_deref().and_then(|b| b.parse::<u64>().ok()) {
        parts.push(format_bitrate(bps));
    }
    parts.join(" ")
}

/// Human-readable summary of a probe result.
pub fn print_media_info<W: Write>(out: &mut W, info: &MediaInfo) -> io::Result<()> {
    print_field(out, "File", info.source.display())?;
    if let Some(format) = &info.format.format_name {
        print_field(out, "Format", format)?;
    }
    if let Some(secs) = info.format.duration.as_deref().and_then(|d| d.parse::<f64>().ok()) {
        print_field(out, "Duration", format!("{} ({secs:.3} s)", format_duration(secs)))?;
    }
    if let Some(size) = info.format.size.as_deref().and_then(|s| s.parse::<u64>().ok()) {
        print_field(out, "Size", format_bytes(size))?;
    }
    if let Some(bps) = info.format.bit_rate.as_deref().and_then(|b| b.parse::<u64>().ok()) {
        print_field(out, "Bitrate", format_bitrate(bps))?;
    }

    if info.streams.is_empty() {
        writeln!(out, "{}", style("No streams").yellow())?;
    }
    for stream in &info.streams {
        print_field(out, &format!("Stream #{}", stream.index), describe_stream(stream))?;
    }
    Ok(())
}
