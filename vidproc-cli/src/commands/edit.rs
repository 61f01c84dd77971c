// vidproc-cli/src/commands/edit.rs
//
// Subcommands that write a new file with ffmpeg.

use std::io::Write;
use std::path::{Path, PathBuf};

use console::style;
use vidproc_core::VideoProcessor;
use vidproc_core::external::{FfmpegSpawner, FfprobeExecutor};

use crate::error::CliResult;

pub fn run_burn_subtitles<P, S, W>(
    processor: &VideoProcessor<P, S>,
    subtitles: &Path,
    output: &Path,
    out: &mut W,
) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    processor.burn_subtitles(subtitles, output)?;
    writeln!(
        out,
        "{} Burned {} into {}",
        style("✓").green(),
        subtitles.display(),
        output.display()
    )?;
    Ok(())
}

pub fn run_concat<P, S, W>(
    processor: &VideoProcessor<P, S>,
    inputs: &[PathBuf],
    output: &Path,
    out: &mut W,
) -> CliResult<()>
where
    P: FfprobeExecutor,
    S: FfmpegSpawner,
    W: Write,
{
    processor.concatenate_videos(inputs, output)?;
    writeln!(
        out,
        "{} Concatenated {} videos into {}",
        style("✓").green(),
        inputs.len(),
        output.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vidproc_core::external::mocks::{MockFfmpegSpawner, MockFfprobeExecutor};
    use vidproc_core::{CoreConfig, CoreError};

    #[test]
    fn concat_reports_what_was_written() {
        let dir = tempdir().unwrap();
        let inputs: Vec<PathBuf> = ["a.mp4", "b.mp4", "c.mp4"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, b"x").unwrap();
                path
            })
            .collect();
        let output = dir.path().join("all.mp4");

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("concat", true);
        let processor = VideoProcessor::with_executors(
            &inputs[0],
            CoreConfig::default(),
            MockFfprobeExecutor::new(),
            spawner.clone(),
        );

        let mut out = Vec::new();
        run_concat(&processor, &inputs, &output, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Concatenated 3 videos"));
        assert_eq!(spawner.get_received_calls().len(), 1);
    }

    #[test]
    fn burn_failure_prints_nothing() {
        let dir = tempdir().unwrap();
        let processor = VideoProcessor::with_executors(
            dir.path().join("in.mp4"),
            CoreConfig::default(),
            MockFfprobeExecutor::new(),
            MockFfmpegSpawner::new(),
        );

        let mut out = Vec::new();
        let err = run_burn_subtitles(
            &processor,
            &dir.path().join("missing.srt"),
            &dir.path().join("out.mp4"),
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(out.is_empty());
    }
}
