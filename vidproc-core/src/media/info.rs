//! Parsed ffprobe descriptor and the typed field extraction built on it.
//!
//! `MediaInfo` keeps the values ffprobe reports mostly as raw strings, the
//! same way ffprobe prints them. The accessor methods turn them into typed
//! values and report precisely what was missing when they cannot.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, field_missing};

/// Media stream types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Attachment,
    Data,
    #[default]
    Unknown,
}

impl From<&str> for StreamType {
    fn from(s: &str) -> Self {
        match s {
            "video" => StreamType::Video,
            "audio" => StreamType::Audio,
            "subtitle" => StreamType::Subtitle,
            "attachment" => StreamType::Attachment,
            "data" => StreamType::Data,
            _ => StreamType::Unknown,
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamType::Video => write!(f, "video"),
            StreamType::Audio => write!(f, "audio"),
            StreamType::Subtitle => write!(f, "subtitle"),
            StreamType::Attachment => write!(f, "attachment"),
            StreamType::Data => write!(f, "data"),
            StreamType::Unknown => write!(f, "unknown"),
        }
    }
}

/// One elementary stream as reported by ffprobe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamInfo {
    pub index: u32,
    pub codec_type: StreamType,
    pub codec_name: Option<String>,
    pub codec_long_name: Option<String>,
    pub profile: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub pix_fmt: Option<String>,
    /// Hz, as a decimal string
    pub sample_rate: Option<String>,
    pub channels: Option<i64>,
    pub channel_layout: Option<String>,
    /// Rational string such as "30000/1001"
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
    /// Seconds, as a decimal string
    pub duration: Option<String>,
    /// Bits per second, as a decimal string
    pub bit_rate: Option<String>,
    pub nb_frames: Option<String>,
}

/// Container-level information.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormatInfo {
    pub format_name: Option<String>,
    pub format_long_name: Option<String>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
    pub size: Option<String>,
}

/// Everything ffprobe reported about one file. Recomputed on every probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaInfo {
    pub source: PathBuf,
    pub streams: Vec<StreamInfo>,
    pub format: FormatInfo,
}

impl MediaInfo {
    /// Builds a `MediaInfo` from ffprobe's `-print_format json` document.
    ///
    /// The document must be an object with a `streams` array; `format` is
    /// optional. Fields may be strings or numbers, ffprobe is not consistent
    /// across versions.
    pub fn from_ffprobe_json(source: &Path, json: &Value) -> CoreResult<Self> {
        let probe_failure = |reason: &str| CoreError::ProbeFailure {
            path: source.to_path_buf(),
            reason: reason.to_string(),
        };

        let root = json
            .as_object()
            .ok_or_else(|| probe_failure("ffprobe output is not a JSON object"))?;
        let streams = root
            .get("streams")
            .and_then(Value::as_array)
            .ok_or_else(|| probe_failure("ffprobe output has no 'streams' array"))?;

        let streams = streams
            .iter()
            .filter_map(Value::as_object)
            .enumerate()
            .map(|(position, stream)| parse_stream(position, stream))
            .collect();

        let format = root
            .get("format")
            .and_then(Value::as_object)
            .map(parse_format)
            .unwrap_or_default();

        Ok(Self {
            source: source.to_path_buf(),
            streams,
            format,
        })
    }

    /// Streams of the given type, in container order.
    pub fn streams_of(&self, codec_type: StreamType) -> impl Iterator<Item = &StreamInfo> {
        self.streams
            .iter()
            .filter(move |s| s.codec_type == codec_type)
    }

    pub fn first_stream(&self, codec_type: StreamType) -> Option<&StreamInfo> {
        self.streams_of(codec_type).next()
    }

    fn require_stream(&self, codec_type: StreamType) -> CoreResult<&StreamInfo> {
        self.first_stream(codec_type)
            .ok_or_else(|| CoreError::StreamNotFound {
                path: self.source.clone(),
                kind: codec_type,
            })
    }

    /// `codec_name` of the first stream of `codec_type`.
    pub fn codec(&self, codec_type: StreamType) -> CoreResult<String> {
        let stream = self.require_stream(codec_type)?;
        stream
            .codec_name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| field_missing(&self.source, scope(codec_type), "codec_name"))
    }

    pub fn video_codec(&self) -> CoreResult<String> {
        self.codec(StreamType::Video)
    }

    pub fn audio_codec(&self) -> CoreResult<String> {
        self.codec(StreamType::Audio)
    }

    /// Bitrate of the first stream of `codec_type` in bits/second.
    ///
    /// Matroska and some other containers do not store per-stream bitrates.
    /// The format-level bitrate then stands in when the stream is the only
    /// one in the container. With several streams it is only an upper bound
    /// for video and meaningless for audio, so audio reports the field as
    /// missing.
    pub fn bitrate(&self, codec_type: StreamType) -> CoreResult<u64> {
        let stream = self.require_stream(codec_type)?;
        if let Some(bps) = stream.bit_rate.as_deref().and_then(parse_positive_u64) {
            return Ok(bps);
        }

        let missing = || field_missing(&self.source, scope(codec_type), "bit_rate");
        let bps = self
            .format
            .bit_rate
            .as_deref()
            .and_then(parse_positive_u64)
            .ok_or_else(missing)?;

        if self.streams.len() == 1 {
            log::debug!(
                "{} has no per-stream {} bitrate, using format bitrate {}",
                self.source.display(),
                codec_type,
                bps
            );
            return Ok(bps);
        }

        match codec_type {
            StreamType::Video => {
                log::warn!(
                    "{} has no per-stream video bitrate, using format bitrate {} which includes {} other stream(s)",
                    self.source.display(),
                    bps,
                    self.streams.len() - 1
                );
                Ok(bps)
            }
            _ => Err(missing()),
        }
    }

    pub fn video_bitrate(&self) -> CoreResult<u64> {
        self.bitrate(StreamType::Video)
    }

    pub fn audio_bitrate(&self) -> CoreResult<u64> {
        self.bitrate(StreamType::Audio)
    }

    /// `(width, height)` of the first video stream.
    pub fn video_dimensions(&self) -> CoreResult<(u32, u32)> {
        let stream = self.require_stream(StreamType::Video)?;
        let dimension = |value: Option<i64>, field: &'static str| {
            value
                .filter(|v| *v > 0)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| field_missing(&self.source, scope(StreamType::Video), field))
        };

        Ok((
            dimension(stream.width, "width")?,
            dimension(stream.height, "height")?,
        ))
    }

    /// Sample rate of the first audio stream in Hz.
    pub fn audio_sample_rate(&self) -> CoreResult<u32> {
        let stream = self.require_stream(StreamType::Audio)?;
        stream
            .sample_rate
            .as_deref()
            .and_then(|rate| rate.trim().parse::<u32>().ok())
            .filter(|rate| *rate > 0)
            .ok_or_else(|| field_missing(&self.source, scope(StreamType::Audio), "sample_rate"))
    }

    /// Frames per second of the first video stream.
    ///
    /// `r_frame_rate` is preferred; `avg_frame_rate` is used when it is absent
    /// or degenerate (ffprobe prints "0/0" for streams without a rate).
    pub fn frame_rate(&self) -> CoreResult<f64> {
        let stream = self.require_stream(StreamType::Video)?;
        stream
            .r_frame_rate
            .as_deref()
            .and_then(parse_frame_rate)
            .or_else(|| stream.avg_frame_rate.as_deref().and_then(parse_frame_rate))
            .ok_or_else(|| field_missing(&self.source, scope(StreamType::Video), "r_frame_rate"))
    }

    /// Duration in seconds.
    ///
    /// Taken from the first video stream, or from the container when the
    /// stream does not carry one (or there is no video stream at all).
    pub fn duration(&self) -> CoreResult<f64> {
        let stream_duration = self
            .first_stream(StreamType::Video)
            .and_then(|s| s.duration.as_deref())
            .and_then(parse_positive_f64);

        if let Some(secs) = stream_duration {
            return Ok(secs);
        }

        self.format
            .duration
            .as_deref()
            .and_then(parse_positive_f64)
            .ok_or_else(|| field_missing(&self.source, "video stream and format", "duration"))
    }
}

fn scope(codec_type: StreamType) -> String {
    format!("{codec_type} stream")
}

/// Parses an ffprobe frame rate: a rational "num/den" or a plain number.
///
/// Returns `None` for zero denominators, zero rates and anything that is not
/// a finite positive number.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let rate = rate.trim();
    let fps = match rate.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.parse::<f64>().ok()?,
    };

    (fps.is_finite() && fps > 0.0).then_some(fps)
}

fn parse_positive_f64(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_positive_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

fn parse_stream(position: usize, stream: &Map<String, Value>) -> StreamInfo {
    let index = stream
        .get("index")
        .and_then(Value::as_u64)
        .and_then(|i| u32::try_from(i).ok())
        .unwrap_or(position as u32);

    let codec_type = stream
        .get("codec_type")
        .and_then(Value::as_str)
        .map(StreamType::from)
        .unwrap_or_default();

    StreamInfo {
        index,
        codec_type,
        codec_name: text(stream, "codec_name"),
        codec_long_name: text(stream, "codec_long_name"),
        profile: text(stream, "profile"),
        width: integer(stream, "width"),
        height: integer(stream, "height"),
        pix_fmt: text(stream, "pix_fmt"),
        sample_rate: text(stream, "sample_rate"),
        channels: integer(stream, "channels"),
        channel_layout: text(stream, "channel_layout"),
        r_frame_rate: text(stream, "r_frame_rate"),
        avg_frame_rate: text(stream, "avg_frame_rate"),
        duration: text(stream, "duration"),
        bit_rate: text(stream, "bit_rate"),
        nb_frames: text(stream, "nb_frames"),
    }
}

fn parse_format(format: &Map<String, Value>) -> FormatInfo {
    FormatInfo {
        format_name: text(format, "format_name"),
        format_long_name: text(format, "format_long_name"),
        duration: text(format, "duration"),
        bit_rate: text(format, "bit_rate"),
        size: text(format, "size"),
    }
}

/// Reads a field as text, accepting JSON strings and numbers.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if s != "N/A" => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> Value {
        json!({
            "streams": [
                {
                    "index": 0,
                    "codec_name": "h264",
                    "codec_long_name": "H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10",
                    "profile": "High",
                    "codec_type": "video",
                    "width": 1920,
                    "height": 1080,
                    "pix_fmt": "yuv420p",
                    "r_frame_rate": "30000/1001",
                    "avg_frame_rate": "30000/1001",
                    "duration": "5.005000",
                    "bit_rate": "2500000",
                    "nb_frames": "150"
                },
                {
                    "index": 1,
                    "codec_name": "aac",
                    "codec_type": "audio",
                    "sample_rate": "48000",
                    "channels": 2,
                    "channel_layout": "stereo",
                    "r_frame_rate": "0/0",
                    "bit_rate": "128000"
                }
            ],
            "format": {
                "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
                "duration": "5.034000",
                "bit_rate": "2650000",
                "size": "1667546"
            }
        })
    }

    fn sample() -> MediaInfo {
        MediaInfo::from_ffprobe_json(Path::new("sample.mp4"), &sample_json()).unwrap()
    }

    #[test]
    fn parses_streams_and_format() {
        let info = sample();
        assert_eq!(info.streams.len(), 2);
        assert_eq!(info.streams[0].codec_type, StreamType::Video);
        assert_eq!(info.streams[1].codec_type, StreamType::Audio);
        assert_eq!(info.streams[1].channels, Some(2));
        assert_eq!(info.format.format_name.as_deref(), Some("mov,mp4,m4a,3gp,3g2,mj2"));
        assert_eq!(info.source, PathBuf::from("sample.mp4"));
    }

    #[test]
    fn rejects_documents_without_streams() {
        let err = MediaInfo::from_ffprobe_json(Path::new("x.mkv"), &json!({ "format": {} }))
            .unwrap_err();
        assert!(matches!(err, CoreError::ProbeFailure { .. }));

        let err = MediaInfo::from_ffprobe_json(Path::new("x.mkv"), &json!([1, 2])).unwrap_err();
        assert!(matches!(err, CoreError::ProbeFailure { .. }));
    }

    #[test]
    fn extracts_codecs() {
        let info = sample();
        assert_eq!(info.video_codec().unwrap(), "h264");
        assert_eq!(info.audio_codec().unwrap(), "aac");
    }

    #[test]
    fn missing_audio_stream_is_stream_not_found() {
        let mut info = sample();
        info.streams.retain(|s| s.codec_type != StreamType::Audio);

        for result in [
            info.audio_codec().map(|_| ()),
            info.audio_bitrate().map(|_| ()),
            info.audio_sample_rate().map(|_| ()),
        ] {
            match result {
                Err(CoreError::StreamNotFound { kind, .. }) => assert_eq!(kind, StreamType::Audio),
                other => panic!("expected StreamNotFound, got {other:?}"),
            }
        }
    }

    #[test]
    fn stream_bitrate_wins_over_format_bitrate() {
        let info = sample();
        assert_eq!(info.video_bitrate().unwrap(), 2_500_000);
        assert_eq!(info.audio_bitrate().unwrap(), 128_000);
    }

    #[test]
    fn bitrate_falls_back_to_format() {
        let mut info = sample();
        info.streams[0].bit_rate = None;
        assert_eq!(info.video_bitrate().unwrap(), 2_650_000);

        info.format.bit_rate = None;
        assert!(matches!(
            info.video_bitrate(),
            Err(CoreError::FieldMissing { field: "bit_rate", .. })
        ));
    }

    #[test]
    fn audio_never_reports_the_container_total_of_a_muxed_file() {
        let mut info = sample();
        info.streams[1].bit_rate = None;
        assert!(matches!(
            info.audio_bitrate(),
            Err(CoreError::FieldMissing { field: "bit_rate", .. })
        ));
        assert_eq!(info.video_bitrate().unwrap(), 2_500_000);
    }

    #[test]
    fn audio_only_file_uses_format_bitrate() {
        let mut info = sample();
        info.streams.retain(|s| s.codec_type == StreamType::Audio);
        info.streams[0].bit_rate = None;
        info.format.bit_rate = Some("192000".into());
        assert_eq!(info.audio_bitrate().unwrap(), 192_000);
    }

    #[test]
    fn dimensions_must_be_positive() {
        let mut info = sample();
        assert_eq!(info.video_dimensions().unwrap(), (1920, 1080));

        info.streams[0].height = Some(0);
        assert!(matches!(
            info.video_dimensions(),
            Err(CoreError::FieldMissing { field: "height", .. })
        ));
    }

    #[test]
    fn sample_rate_is_parsed_from_string() {
        assert_eq!(sample().audio_sample_rate().unwrap(), 48_000);
    }

    #[test]
    fn ntsc_frame_rate() {
        let fps = sample().frame_rate().unwrap();
        assert!((fps - 29.97).abs() < 0.01, "got {fps}");
    }

    #[test]
    fn frame_rate_falls_back_to_average_rate() {
        let mut info = sample();
        info.streams[0].r_frame_rate = Some("0/0".to_string());
        info.streams[0].avg_frame_rate = Some("25/1".to_string());
        assert_eq!(info.frame_rate().unwrap(), 25.0);

        info.streams[0].avg_frame_rate = Some("24/0".to_string());
        assert!(matches!(
            info.frame_rate(),
            Err(CoreError::FieldMissing { field: "r_frame_rate", .. })
        ));
    }

    #[test]
    fn parse_frame_rate_cases() {
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("24"), Some(24.0));
        assert_eq!(parse_frame_rate(" 50/2 "), Some(25.0));
        assert_eq!(parse_frame_rate("1/0"), None);
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("abc/1"), None);
        assert_eq!(parse_frame_rate(""), None);
    }

    #[test]
    fn duration_prefers_stream_then_format() {
        let mut info = sample();
        assert_eq!(info.duration().unwrap(), 5.005);

        info.streams[0].duration = None;
        assert_eq!(info.duration().unwrap(), 5.034);

        info.streams.retain(|s| s.codec_type != StreamType::Video);
        assert_eq!(info.duration().unwrap(), 5.034);

        info.format.duration = None;
        assert!(matches!(
            info.duration(),
            Err(CoreError::FieldMissing { field: "duration", .. })
        ));
    }

    #[test]
    fn not_available_values_are_treated_as_absent() {
        let json = json!({
            "streams": [{ "index": 0, "codec_type": "video", "duration": "N/A", "width": "640", "height": 360 }],
            "format": { "duration": 12.5 }
        });
        let info = MediaInfo::from_ffprobe_json(Path::new("clip.ts"), &json).unwrap();
        assert_eq!(info.streams[0].duration, None);
        assert_eq!(info.video_dimensions().unwrap(), (640, 360));
        assert_eq!(info.duration().unwrap(), 12.5);
    }

    #[test]
    fn serializes_stream_type_lowercase() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["streams"][0]["codec_type"], "video");
        assert_eq!(value["streams"][1]["codec_type"], "audio");
    }
}
