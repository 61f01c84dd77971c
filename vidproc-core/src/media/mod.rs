//! Media information model
//!
//! Data structures describing what ffprobe reports about a file, plus the
//! typed field extraction the processor exposes.

pub mod info;

// Re-export commonly used types
pub use info::{FormatInfo, MediaInfo, StreamInfo, StreamType, parse_frame_rate};
