// vidproc-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidproc: inspect and edit video files",
    long_about = "Reads stream properties with ffprobe, burns subtitles and concatenates videos with ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ffmpeg binary to use instead of the one on PATH
    #[arg(long, global = true, value_name = "PATH", env = "VIDPROC_FFMPEG")]
    pub ffmpeg_path: Option<PathBuf>,

    /// ffprobe binary to use instead of the one on PATH
    #[arg(long, global = true, value_name = "PATH", env = "VIDPROC_FFPROBE")]
    pub ffprobe_path: Option<PathBuf>,

    /// Directory for temporary files (defaults to the system temp dir)
    #[arg(long, global = true, value_name = "DIR", env = "VIDPROC_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Fail instead of overwriting an existing output file
    #[arg(long, global = true)]
    pub no_overwrite: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shows every stream and container property ffprobe reports
    Info(InfoArgs),
    /// Prints the codec name of the first video or audio stream
    Codec(StreamArgs),
    /// Prints the bitrate (bits/s) of the first video or audio stream
    Bitrate(StreamArgs),
    /// Prints the video resolution as WIDTHxHEIGHT
    Dimensions(InputArgs),
    /// Prints the audio sample rate in Hz
    SampleRate(InputArgs),
    /// Prints the video frame rate in frames per second
    FrameRate(InputArgs),
    /// Prints the duration in seconds
    Duration(InputArgs),
    /// Renders a subtitle file onto the video, re-encoding the picture
    BurnSubtitles(BurnArgs),
    /// Joins videos end to end without re-encoding
    Concat(ConcatArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Media file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Media file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Print the full probe result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which stream a per-stream query looks at.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSelector {
    Video,
    Audio,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Media file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = StreamSelector::Video)]
    pub stream: StreamSelector,
}

#[derive(Args, Debug)]
pub struct BurnArgs {
    /// Source video
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Subtitle file (any format ffmpeg's subtitles filter reads, e.g. .srt, .ass)
    #[arg(value_name = "SUBTITLES")]
    pub subtitles: PathBuf,

    /// Where the subtitled video is written
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Videos to join, in order (at least two)
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Where the joined video is written
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,
}
