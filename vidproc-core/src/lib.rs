//! Core library for inspecting and editing video files with ffprobe and ffmpeg.
//!
//! Properties are read from ffprobe's JSON output; editing operations
//! (burning subtitles, concatenation) run a single ffmpeg command each.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidproc_core::VideoProcessor;
//! use std::path::{Path, PathBuf};
//!
//! let processor = VideoProcessor::new("/videos/talk.mp4");
//! let (width, height) = processor.get_video_dimensions().unwrap();
//! let fps = processor.get_frame_rate().unwrap();
//! println!("{width}x{height} @ {fps:.3} fps");
//!
//! processor
//!     .burn_subtitles(Path::new("/videos/talk.srt"), Path::new("/videos/talk.subbed.mp4"))
//!     .unwrap();
//!
//! processor
//!     .concatenate_videos(
//!         &[PathBuf::from("/videos/intro.mp4"), PathBuf::from("/videos/talk.mp4")],
//!         Path::new("/videos/full.mp4"),
//!     )
//!     .unwrap();
//! ```

pub mod config;
pub mod editing;
pub mod error;
pub mod external;
pub mod media;
pub mod processor;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::is_tool_available;
pub use media::{FormatInfo, MediaInfo, StreamInfo, StreamType, parse_frame_rate};
pub use processor::VideoProcessor;
pub use utils::{format_bitrate, format_bytes, format_duration};
