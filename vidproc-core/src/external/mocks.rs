// vidproc-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor};
use crate::error::{CoreError, CoreResult};
use crate::media::MediaInfo;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    // Raw wait status: the exit code lives in the second byte.
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of FfmpegProcess.
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
    /// When set, handle_events fails with this message after emitting events.
    pub event_stream_error: Option<String>,
    waits: Rc<Cell<usize>>,
    kills: Rc<Cell<usize>>,
}

impl MockFfmpegProcess {
    pub fn new(events_to_emit: Vec<FfmpegEvent>, exit_status: ExitStatus) -> Self {
        Self {
            events_to_emit,
            exit_status,
            event_stream_error: None,
            waits: Rc::default(),
            kills: Rc::default(),
        }
    }
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.drain(..) {
            handler(event)?;
        }
        match &self.event_stream_error {
            Some(message) => Err(CoreError::Io(std::io::Error::other(message.clone()))),
            None => Ok(()),
        }
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.waits.set(self.waits.get() + 1);
        Ok(self.exit_status)
    }

    fn kill(&mut self) -> CoreResult<()> {
        self.kills.set(self.kills.get() + 1);
        Ok(())
    }
}

enum MockOutcome {
    Run {
        process: MockFfmpegProcess,
        create_dummy_output: bool,
    },
    ToolMissing,
}

/// Represents an expected ffmpeg command call and its mock result.
struct MockFfmpegExpectation {
    arg_pattern: String,
    outcome: MockOutcome,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each expectation is matched (and consumed) by the first spawned command
/// that has an argument containing its pattern. Every spawned command's
/// arguments are recorded, matched or not.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
    waits: Rc<Cell<usize>>,
    kills: Rc<Cell<usize>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    fn push(&self, arg_pattern: &str, outcome: MockOutcome) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            outcome,
        });
    }

    /// ffmpeg exits 0. With `create_dummy_output` the last argument is
    /// created as an empty file, mimicking the real output.
    pub fn add_success_expectation(&self, arg_pattern: &str, create_dummy_output: bool) {
        self.push(
            arg_pattern,
            MockOutcome::Run {
                process: MockFfmpegProcess::new(Vec::new(), exit_status(0)),
                create_dummy_output,
            },
        );
    }

    /// ffmpeg logs `stderr_lines` at error level and exits with `exit_code`.
    pub fn add_exit_error_expectation(&self, arg_pattern: &str, stderr_lines: &[&str], exit_code: i32) {
        let events = stderr_lines
            .iter()
            .map(|line| FfmpegEvent::Log(LogLevel::Error, (*line).to_string()))
            .collect();
        self.push(
            arg_pattern,
            MockOutcome::Run {
                process: MockFfmpegProcess::new(events, exit_status(exit_code)),
                create_dummy_output: false,
            },
        );
    }

    /// Spawning fails as if the ffmpeg binary did not exist.
    pub fn add_tool_missing_expectation(&self, arg_pattern: &str) {
        self.push(arg_pattern, MockOutcome::ToolMissing);
    }

    /// Reading ffmpeg's output fails with `message`; the process would exit 0.
    pub fn add_event_stream_error_expectation(&self, arg_pattern: &str, message: &str) {
        let mut process = MockFfmpegProcess::new(Vec::new(), exit_status(0));
        process.event_stream_error = Some(message.to_string());
        self.push(
            arg_pattern,
            MockOutcome::Run {
                process,
                create_dummy_output: false,
            },
        );
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// Total `wait` calls across every process spawned by this mock.
    pub fn wait_count(&self) -> usize {
        self.waits.get()
    }

    /// Total `kill` calls across every process spawned by this mock.
    pub fn kill_count(&self) -> usize {
        self.kills.get()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args = super::command_args(&mut cmd);
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            log::error!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
            panic!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
        };

        let expectation = expectations.remove(index);
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        match expectation.outcome {
            MockOutcome::Run {
                mut process,
                create_dummy_output,
            } => {
                process.waits = Rc::clone(&self.waits);
                process.kills = Rc::clone(&self.kills);
                if create_dummy_output {
                    if let Some(output_path) = args.last() {
                        std::fs::File::create(output_path)?;
                    }
                }
                Ok(process)
            }
            MockOutcome::ToolMissing => Err(CoreError::ProcessNotFound("ffmpeg".to_string())),
        }
    }
}

#[derive(Clone)]
enum MockProbe {
    Info(MediaInfo),
    Failure(String),
    ToolMissing,
}

/// Mock implementation of FfprobeExecutor keyed by input path.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    results: Rc<RefCell<HashMap<PathBuf, MockProbe>>>,
    calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Probing `input_path` returns `info` (with `source` set to the path).
    pub fn expect_media_info(&self, input_path: &Path, info: MediaInfo) {
        let info = MediaInfo {
            source: input_path.to_path_buf(),
            ..info
        };
        self.results
            .borrow_mut()
            .insert(input_path.to_path_buf(), MockProbe::Info(info));
    }

    /// Probing `input_path` fails with `ProbeFailure`.
    pub fn expect_probe_failure(&self, input_path: &Path, reason: &str) {
        self.results
            .borrow_mut()
            .insert(input_path.to_path_buf(), MockProbe::Failure(reason.to_string()));
    }

    /// Probing `input_path` fails with `ProcessNotFound`.
    pub fn expect_tool_missing(&self, input_path: &Path) {
        self.results
            .borrow_mut()
            .insert(input_path.to_path_buf(), MockProbe::ToolMissing);
    }

    /// Paths probed so far, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        log::info!("MockFfprobeExecutor::probe called for: {}", input_path.display());
        self.calls.borrow_mut().push(input_path.to_path_buf());

        match self.results.borrow().get(input_path).cloned() {
            Some(MockProbe::Info(info)) => Ok(info),
            Some(MockProbe::Failure(reason)) => Err(CoreError::ProbeFailure {
                path: input_path.to_path_buf(),
                reason,
            }),
            Some(MockProbe::ToolMissing) => Err(CoreError::ProcessNotFound("ffprobe".to_string())),
            None => {
                // Unknown paths behave like the real tool on a missing file.
                log::warn!(
                    "MockFfprobeExecutor: No expectation set for path: {}",
                    input_path.display()
                );
                Err(CoreError::ProbeFailure {
                    path: input_path.to_path_buf(),
                    reason: "No such file or directory".to_string(),
                })
            }
        }
    }
}
