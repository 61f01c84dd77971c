// ============================================================================
// vidproc-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// Abstractions for spawning FFmpeg processes and draining their output.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - run_ffmpeg: Spawn, drain events, wait, and map failures to CoreError

use crate::error::{CoreResult, command_failed_error, command_start_error};
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::collections::VecDeque;
use std::process::ExitStatus;

/// Number of trailing ffmpeg log lines kept for error reports.
pub const STDERR_TAIL_LINES: usize = 40;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;

    /// Terminates the command without waiting for it.
    fn kill(&mut self) -> CoreResult<()>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            command_failed_error("event stream", ExitStatus::default(), e.to_string())
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.0.wait()?)
    }

    fn kill(&mut self) -> CoreResult<()> {
        Ok(self.0.kill()?)
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let program = cmd.as_inner().get_program().to_string_lossy().into_owned();
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error(program, e))
    }
}

/// Runs an ffmpeg command to completion.
///
/// The event stream is always drained before waiting so ffmpeg never blocks
/// on a full stderr pipe. On a non-zero exit the last [`STDERR_TAIL_LINES`]
/// log lines are returned inside `CoreError::EncodeFailure`. If the event
/// stream itself breaks, the child is killed and reaped before the error is
/// returned.
pub fn run_ffmpeg<S: FfmpegSpawner>(
    spawner: &S,
    mut cmd: FfmpegCommand,
    operation: &str,
) -> CoreResult<()> {
    log::debug!("Running ffmpeg ({}): {:?}", operation, cmd.as_inner());

    let mut process = spawner.spawn(cmd)?;
    let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
    let mut remember = |line: String| {
        if stderr_tail.len() == STDERR_TAIL_LINES {
            stderr_tail.pop_front();
        }
        stderr_tail.push_back(line);
    };

    let drained = process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(level, message) => {
                match level {
                    LogLevel::Error | LogLevel::Fatal => log::warn!("ffmpeg: {}", message),
                    _ => log::trace!("ffmpeg: {}", message),
                }
                remember(message);
            }
            FfmpegEvent::Error(error) => {
                log::warn!("ffmpeg error: {}", error);
                remember(format!("ERROR: {error}"));
            }
            _ => {}
        }
        Ok(())
    });

    if let Err(e) = drained {
        log::error!("ffmpeg ({}) event stream failed: {}", operation, e);
        if let Err(kill_err) = process.kill() {
            log::debug!("Could not kill ffmpeg ({}): {}", operation, kill_err);
        }
        match process.wait() {
            Ok(status) => log::debug!("ffmpeg ({}) reaped with {}", operation, status),
            Err(wait_err) => log::warn!("Could not reap ffmpeg ({}): {}", operation, wait_err),
        }
        return Err(e);
    }

    let status = process.wait()?;
    if status.success() {
        log::debug!("ffmpeg ({}) finished successfully", operation);
        return Ok(());
    }

    let stderr = stderr_tail.into_iter().collect::<Vec<_>>().join("\n");
    log::error!("ffmpeg ({}) failed: {}", operation, status);
    Err(command_failed_error(operation, status, stderr))
}
