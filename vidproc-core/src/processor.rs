// ============================================================================
// vidproc-core/src/processor.rs
// ============================================================================
//
// VIDEO PROCESSOR: Facade over probing and editing for one source file
//
// A `VideoProcessor` is bound to a single source path. Every query runs
// ffprobe again (results are never cached, so a file replaced on disk is
// picked up), and every editing operation runs a single ffmpeg command.
//
// KEY COMPONENTS:
// - VideoProcessor: Owns the source path, configuration and executors
// - Property queries: codec, bitrate, dimensions, sample rate, fps, duration
// - Editing: burn_subtitles, concatenate_videos

use std::path::{Path, PathBuf};

use crate::config::CoreConfig;
use crate::editing::{self, BurnOptions};
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandFfprobeExecutor, FfmpegSpawner, FfprobeExecutor, SidecarSpawner};
use crate::media::MediaInfo;

/// Inspects and edits one video file through ffprobe and ffmpeg.
///
/// The executors are type parameters so tests can substitute mocks; the
/// defaults run the real binaries.
#[derive(Debug, Clone)]
pub struct VideoProcessor<P = CommandFfprobeExecutor, S = SidecarSpawner> {
    source_path: PathBuf,
    config: CoreConfig,
    prober: P,
    spawner: S,
}

impl VideoProcessor {
    /// Processor for `source_path` using the tools on PATH.
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self::with_config(source_path, CoreConfig::default())
    }

    pub fn with_config(source_path: impl Into<PathBuf>, config: CoreConfig) -> Self {
        let prober = CommandFfprobeExecutor::from_config(&config);
        Self::with_executors(source_path, config, prober, SidecarSpawner)
    }
}

impl<P: FfprobeExecutor, S: FfmpegSpawner> VideoProcessor<P, S> {
    pub fn with_executors(
        source_path: impl Into<PathBuf>,
        config: CoreConfig,
        prober: P,
        spawner: S,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            config,
            prober,
            spawner,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Full ffprobe descriptor of the source.
    pub fn get_video_info(&self) -> CoreResult<MediaInfo> {
        log::debug!("Probing {}", self.source_path.display());
        self.prober.probe(&self.source_path)
    }

    pub fn get_video_codec(&self) -> CoreResult<String> {
        self.get_video_info()?.video_codec()
    }

    pub fn get_audio_codec(&self) -> CoreResult<String> {
        self.get_video_info()?.audio_codec()
    }

    /// Video bitrate in bits per second.
    pub fn get_video_bitrate(&self) -> CoreResult<u64> {
        self.get_video_info()?.video_bitrate()
    }

    /// Audio bitrate in bits per second.
    pub fn get_audio_bitrate(&self) -> CoreResult<u64> {
        self.get_video_info()?.audio_bitrate()
    }

    /// `(width, height)` in pixels.
    pub fn get_video_dimensions(&self) -> CoreResult<(u32, u32)> {
        self.get_video_info()?.video_dimensions()
    }

    /// Audio sample rate in Hz.
    pub fn get_audio_sample_rate(&self) -> CoreResult<u32> {
        self.get_video_info()?.audio_sample_rate()
    }

    pub fn get_frame_rate(&self) -> CoreResult<f64> {
        self.get_video_info()?.frame_rate()
    }

    /// Duration in seconds.
    pub fn get_duration(&self) -> CoreResult<f64> {
        self.get_video_info()?.duration()
    }

    /// Burns `subtitle_path` into the source video, writing `output_path`.
    ///
    /// The video is re-encoded with the source's codec and bitrate, found with
    /// a single probe. A missing codec or bitrate leaves the choice to ffmpeg;
    /// a source without any video stream is an error.
    pub fn burn_subtitles(&self, subtitle_path: &Path, output_path: &Path) -> CoreResult<()> {
        editing::require_file(subtitle_path, "Subtitle file")?;
        editing::reject_output_in_place(output_path, &[&self.source_path, subtitle_path])?;

        let info = self.get_video_info()?;
        let video_codec = match info.video_codec() {
            Ok(codec) => Some(codec),
            Err(CoreError::FieldMissing { .. }) => {
                log::warn!(
                    "No codec name for the video of {}, letting ffmpeg choose",
                    self.source_path.display()
                );
                None
            }
            Err(e) => return Err(e),
        };
        let video_bitrate = info.video_bitrate().ok();

        let options = BurnOptions {
            video_codec,
            video_bitrate,
        };
        editing::burn_subtitles(
            &self.spawner,
            &self.config,
            &self.source_path,
            subtitle_path,
            output_path,
            &options,
        )
    }

    /// Joins `inputs` in the given order into `output_path` by stream copy.
    ///
    /// The source path of this processor is not implicitly part of the list.
    pub fn concatenate_videos(&self, inputs: &[PathBuf], output_path: &Path) -> CoreResult<()> {
        editing::concatenate_videos(&self.spawner, &self.config, inputs, output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::{MockFfmpegSpawner, MockFfprobeExecutor};
    use crate::media::StreamType;
    use serde_json::json;
    use tempfile::tempdir;

    fn media_info(json: serde_json::Value) -> MediaInfo {
        MediaInfo::from_ffprobe_json(Path::new("fixture"), &json).unwrap()
    }

    fn h264_aac() -> MediaInfo {
        media_info(json!({
            "streams": [
                {
                    "index": 0, "codec_type": "video", "codec_name": "h264",
                    "width": 1280, "height": 720,
                    "r_frame_rate": "30000/1001", "avg_frame_rate": "30000/1001",
                    "duration": "5.005000", "bit_rate": "1800000"
                },
                {
                    "index": 1, "codec_type": "audio", "codec_name": "aac",
                    "sample_rate": "44100", "bit_rate": "96000"
                }
            ],
            "format": { "duration": "5.020000", "bit_rate": "1900000" }
        }))
    }

    fn processor(
        source: &Path,
        info: Option<MediaInfo>,
    ) -> (
        VideoProcessor<MockFfprobeExecutor, MockFfmpegSpawner>,
        MockFfprobeExecutor,
        MockFfmpegSpawner,
    ) {
        let prober = MockFfprobeExecutor::new();
        if let Some(info) = info {
            prober.expect_media_info(source, info);
        }
        let spawner = MockFfmpegSpawner::new();
        let processor = VideoProcessor::with_executors(
            source,
            CoreConfig::default(),
            prober.clone(),
            spawner.clone(),
        );
        (processor, prober, spawner)
    }

    #[test]
    fn queries_extract_typed_properties() {
        let source = Path::new("clip.mp4");
        let (p, _, _) = processor(source, Some(h264_aac()));

        assert_eq!(p.get_video_codec().unwrap(), "h264");
        assert_eq!(p.get_audio_codec().unwrap(), "aac");
        assert_eq!(p.get_video_bitrate().unwrap(), 1_800_000);
        assert_eq!(p.get_audio_bitrate().unwrap(), 96_000);
        assert_eq!(p.get_video_dimensions().unwrap(), (1280, 720));
        assert_eq!(p.get_audio_sample_rate().unwrap(), 44_100);
        assert!((p.get_frame_rate().unwrap() - 29.97).abs() < 0.01);
        assert!((p.get_duration().unwrap() - 5.005).abs() < 1e-9);
        assert_eq!(p.get_video_info().unwrap().source, source);
    }

    #[test]
    fn every_query_probes_again() {
        let source = Path::new("clip.mp4");
        let (p, prober, _) = processor(source, Some(h264_aac()));

        p.get_video_codec().unwrap();
        p.get_duration().unwrap();
        p.get_frame_rate().unwrap();
        assert_eq!(prober.calls().len(), 3);
    }

    #[test]
    fn missing_source_is_probe_failure() {
        let (p, _, _) = processor(Path::new("does-not-exist.mp4"), None);
        let err = p.get_duration().unwrap_err();
        assert!(matches!(err, CoreError::ProbeFailure { .. }), "got {err:?}");
    }

    #[test]
    fn missing_ffprobe_is_process_not_found() {
        let source = Path::new("clip.mp4");
        let (p, prober, _) = processor(source, None);
        prober.expect_tool_missing(source);
        assert!(matches!(p.get_video_info(), Err(CoreError::ProcessNotFound(_))));
    }

    #[test]
    fn audio_queries_on_silent_video_report_stream_not_found() {
        let source = Path::new("silent.mp4");
        let info = media_info(json!({
            "streams": [{ "codec_type": "video", "codec_name": "vp9", "width": 640, "height": 360 }]
        }));
        let (p, _, _) = processor(source, Some(info));

        match p.get_audio_codec().unwrap_err() {
            CoreError::StreamNotFound { kind, .. } => assert_eq!(kind, StreamType::Audio),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            p.get_audio_sample_rate(),
            Err(CoreError::StreamNotFound { .. })
        ));
    }

    #[test]
    fn burn_uses_source_codec_and_bitrate() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in.mp4");
        let subs = dir.path().join("subs.srt");
        std::fs::write(&subs, "1\n00:00:00,000 --> 00:00:01,000\nhello\n").unwrap();
        let output = dir.path().join("out.mp4");

        let (p, prober, spawner) = processor(&source, Some(h264_aac()));
        spawner.add_success_expectation("subtitles=", true);

        p.burn_subtitles(&subs, &output).unwrap();

        assert_eq!(prober.calls().len(), 1);
        let calls = spawner.get_received_calls();
        assert_eq!(calls.len(), 1);
        let args = calls[0].join(" ");
        assert!(args.contains("-c:v h264"));
        assert!(args.contains("-b:v 1800000"));
        assert!(args.contains("-c:a copy"));
        assert!(output.exists());
    }

    #[test]
    fn burn_without_video_stream_fails_before_ffmpeg() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("audio.m4a");
        let subs = dir.path().join("subs.srt");
        std::fs::write(&subs, "").unwrap();
        let info = media_info(json!({
            "streams": [{ "codec_type": "audio", "codec_name": "aac", "sample_rate": "48000" }]
        }));

        let (p, _, spawner) = processor(&source, Some(info));
        let err = p
            .burn_subtitles(&subs, &dir.path().join("out.mp4"))
            .unwrap_err();

        assert!(matches!(err, CoreError::StreamNotFound { .. }), "got {err:?}");
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn unreadable_source_stops_burn_before_ffmpeg() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.mp4");
        let subs = dir.path().join("subs.srt");
        std::fs::write(&subs, "").unwrap();

        let (p, prober, spawner) = processor(&source, None);
        prober.expect_probe_failure(&source, "Invalid data found when processing input");

        let err = p
            .burn_subtitles(&subs, &dir.path().join("out.mp4"))
            .unwrap_err();

        match err {
            CoreError::ProbeFailure { path, reason } => {
                assert_eq!(path, source);
                assert!(reason.contains("Invalid data"));
            }
            other => panic!("expected ProbeFailure, got {other:?}"),
        }
        assert_eq!(prober.calls(), vec![source.clone()]);
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn burn_with_missing_subtitles_does_not_probe() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in.mp4");
        let (p, prober, spawner) = processor(&source, Some(h264_aac()));

        let err = p
            .burn_subtitles(&dir.path().join("nope.srt"), &dir.path().join("out.mp4"))
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(prober.calls().is_empty());
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn concat_with_one_input_runs_nothing() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.mp4");
        std::fs::write(&a, b"x").unwrap();
        let (p, prober, spawner) = processor(&a, None);

        let err = p
            .concatenate_videos(&[a.clone()], &dir.path().join("out.mp4"))
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(prober.calls().is_empty());
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn concat_failure_is_encode_failure() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.mp4");
        let b = dir.path().join("b.mp4");
        std::fs::write(&a, b"x").unwrap();
        std::fs::write(&b, b"y").unwrap();
        let (p, _, spawner) = processor(&a, None);
        spawner.add_exit_error_expectation("concat", &["Invalid data found when processing input"], 1);

        let err = p
            .concatenate_videos(&[a.clone(), b], &dir.path().join("out.mp4"))
            .unwrap_err();

        match err {
            CoreError::EncodeFailure { operation, stderr, .. } => {
                assert_eq!(operation, "concat");
                assert!(stderr.contains("Invalid data"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
